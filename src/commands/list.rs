//! List stored posts

use anyhow::Result;

use crate::content::PostStatus;
use crate::store::{JsonPostStore, PostStore};
use crate::Workspace;

/// List stored posts, newest first, optionally only `draft` or `published`
pub fn run(workspace: &Workspace, status: Option<&str>) -> Result<()> {
    let status = match status {
        None => None,
        Some("draft") | Some("drafts") => Some(PostStatus::Draft),
        Some("published") => Some(PostStatus::Published),
        Some(other) => anyhow::bail!("Unknown status: {}. Available: draft, published", other),
    };

    let store = JsonPostStore::open(&workspace.data_dir)?;
    let posts = store.list(status)?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} (/{}) [{}] {}",
            post.created_at.format("%Y-%m-%d"),
            post.title,
            post.slug,
            post.status,
            post.category
        );
    }

    Ok(())
}
