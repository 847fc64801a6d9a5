//! Import Markdown files into the staging list

use anyhow::Result;
use std::path::PathBuf;

use crate::admin::{ContentLoader, Staging};
use crate::Workspace;

/// Parse every Markdown file under `paths` and stage the results
pub fn run(workspace: &Workspace, paths: &[PathBuf]) -> Result<usize> {
    let report = ContentLoader::new().import_paths(paths);
    let imported = report.posts.len();

    let mut staging = Staging::load(&workspace.data_dir)?;
    staging.stage_all(report.posts);
    staging.save()?;

    println!(
        "Imported {} post(s); {} staged in total.",
        imported,
        staging.len()
    );
    if !report.skipped.is_empty() {
        println!("Skipped {} non-Markdown file(s).", report.skipped.len());
    }
    for (path, reason) in &report.failed {
        println!("Failed: {} ({})", path.display(), reason);
    }

    Ok(imported)
}

/// Print the staging list with the indexes `unstage` takes
pub fn list_staged(workspace: &Workspace) -> Result<()> {
    let staging = Staging::load(&workspace.data_dir)?;
    if staging.is_empty() {
        println!("Nothing staged.");
        return Ok(());
    }

    println!("Staged ({}):", staging.len());
    for (i, post) in staging.iter().enumerate() {
        println!(
            "  [{}] {} - {} (/{}) [{}]",
            i, post.date, post.title, post.slug, post.status
        );
    }
    Ok(())
}

/// Remove one post from the staging list
pub fn unstage(workspace: &Workspace, index: usize) -> Result<()> {
    let mut staging = Staging::load(&workspace.data_dir)?;
    let removed = staging.remove(index)?;
    staging.save()?;
    println!("Unstaged: {}", removed.title);
    Ok(())
}
