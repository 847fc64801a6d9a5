//! Render a Markdown file

use anyhow::Result;
use std::path::Path;

use crate::admin::ContentLoader;
use crate::content::render_markdown;
use crate::templates::{PostView, TemplateRenderer};
use crate::Workspace;

/// Render `file` as `html` (body fragment), `page` (full article page) or
/// `json` (parsed post plus content blocks)
pub fn render_file(workspace: &Workspace, file: &Path, format: &str) -> Result<String> {
    let post = ContentLoader::new().load_post(file)?;
    tracing::debug!("Rendering {:?} as {}", file, format);

    match format {
        "html" => {
            let renderer = TemplateRenderer::new(&workspace.config)?;
            Ok(renderer.render_body(&post.content))
        }
        "page" => {
            let renderer = TemplateRenderer::new(&workspace.config)?;
            renderer.render_article(&PostView::from(&post), &post.content)
        }
        "json" => {
            let blocks = render_markdown(&post.content);
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "post": post,
                "blocks": blocks,
            }))?)
        }
        _ => anyhow::bail!("Unknown format: {}. Available: html, page, json", format),
    }
}

/// Run the render command
pub fn run(workspace: &Workspace, file: &Path, format: &str) -> Result<()> {
    println!("{}", render_file(workspace, file, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Workspace, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path()).unwrap();
        let file = dir.path().join("hello-world.md");
        fs::write(&file, "## Setup\n\nRun `cargo new`.\n\n1. one\n2. two\n").unwrap();
        (dir, workspace, file)
    }

    #[test]
    fn test_render_html_fragment() {
        let (_dir, workspace, file) = setup();
        let html = render_file(&workspace, &file, "html").unwrap();
        assert!(html.starts_with(r#"<h2 id="setup">Setup</h2>"#));
        assert!(html.contains("<code>cargo new</code>"));
        assert!(html.contains("<ol>\n<li>one</li>\n<li>two</li>\n</ol>"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn test_render_page() {
        let (_dir, workspace, file) = setup();
        let html = render_file(&workspace, &file, "page").unwrap();
        assert!(html.contains("<h1>hello world</h1>"));
        assert!(html.contains(r##"href="#setup""##));
    }

    #[test]
    fn test_render_json() {
        let (_dir, workspace, file) = setup();
        let json: serde_json::Value =
            serde_json::from_str(&render_file(&workspace, &file, "json").unwrap()).unwrap();
        assert_eq!(json["post"]["title"], "hello world");
        assert_eq!(json["post"]["slug"], "hello-world");
        assert_eq!(json["blocks"][0]["type"], "heading");
        assert_eq!(json["blocks"][0]["id"], "setup");
        assert_eq!(json["blocks"][2]["index"], 1);
    }

    #[test]
    fn test_unknown_format() {
        let (_dir, workspace, file) = setup();
        assert!(render_file(&workspace, &file, "pdf").is_err());
    }
}
