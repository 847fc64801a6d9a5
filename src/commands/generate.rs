//! Generative drafts from the command line

use anyhow::Result;
use std::path::Path;

use crate::admin::{ContentLoader, DraftStore, EDITOR_DRAFT_KEY, REVIEW_DRAFT_KEY};
use crate::ai::{
    draft_from_generated, generate_article_content, generate_full_post, generate_search_insights,
    GeminiClient, TextGenerator,
};
use crate::content::ParsedPost;
use crate::helpers::today;
use crate::Workspace;

/// Generate a complete post for `topic` and keep it for review
pub async fn generate_post(
    workspace: &Workspace,
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<ParsedPost> {
    let generated = generate_full_post(generator, topic).await?;
    let draft = draft_from_generated(generated, today());
    DraftStore::new(&workspace.data_dir).save(REVIEW_DRAFT_KEY, &draft);
    Ok(draft)
}

/// Fill in the body of a post file from its title and excerpt; the result
/// becomes the editor draft
pub async fn write_article(
    workspace: &Workspace,
    generator: &dyn TextGenerator,
    file: &Path,
) -> Result<ParsedPost> {
    let mut post = ContentLoader::new().load_post(file)?;
    if post.title.trim().is_empty() {
        anyhow::bail!("{:?} has no title to write about", file);
    }

    post.content = generate_article_content(generator, &post.title, &post.excerpt)
        .await?
        .trim()
        .to_string();
    DraftStore::new(&workspace.data_dir).save(EDITOR_DRAFT_KEY, &post);
    Ok(post)
}

fn client(workspace: &Workspace) -> Result<GeminiClient> {
    Ok(GeminiClient::from_config(&workspace.config.ai)?)
}

/// Run the generate command
pub async fn run(workspace: &Workspace, topic: &str) -> Result<()> {
    let client = client(workspace)?;
    let draft = generate_post(workspace, &client, topic).await?;

    println!("Generated \"{}\" (/{})", draft.title, draft.slug);
    println!("{}", draft.excerpt);
    println!();
    println!("Review with `draftpress draft show`, then `draft approve` or `draft discard`.");
    Ok(())
}

/// Run the write command
pub async fn run_write(workspace: &Workspace, file: &Path) -> Result<()> {
    let client = client(workspace)?;
    let post = write_article(workspace, &client, file).await?;
    println!(
        "Wrote {} characters for \"{}\"; see `draftpress draft show --editor`.",
        post.content.chars().count(),
        post.title
    );
    Ok(())
}

/// Run the insight command
pub async fn run_insight(workspace: &Workspace, query: &str) -> Result<()> {
    let client = client(workspace)?;
    let insight = generate_search_insights(&client, query).await;
    if insight.is_empty() {
        println!("No insight for \"{}\".", query);
    } else {
        println!("{}", insight);
    }
    Ok(())
}
