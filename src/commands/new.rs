//! Create a new post file

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{generate_slug, ParsedPost, PostStatus, DEFAULT_CATEGORY, DEFAULT_READ_TIME};
use crate::helpers::today;
use crate::Workspace;

/// Expand `new_post_name` placeholders
fn post_filename(pattern: &str, slug: &str, date: NaiveDate) -> String {
    pattern
        .replace(":title", slug)
        .replace(":year", &date.format("%Y").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":i_month", &date.format("%-m").to_string())
        .replace(":i_day", &date.format("%-d").to_string())
}

/// Write a draft scaffold for `title` into the posts directory
pub fn create_post(workspace: &Workspace, title: &str) -> Result<PathBuf> {
    let date = today();
    let slug = generate_slug(title);
    let filename = post_filename(&workspace.config.new_post_name, &slug, date);

    let file_path = workspace.posts_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let scaffold = ParsedPost {
        title: title.trim().to_string(),
        slug,
        excerpt: String::new(),
        content: String::new(),
        category: DEFAULT_CATEGORY.to_string(),
        tags: Vec::new(),
        status: PostStatus::Draft,
        read_time: DEFAULT_READ_TIME.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        filename,
    };
    fs::write(&file_path, scaffold.to_markdown())?;

    println!("Created: {:?}", file_path);
    Ok(file_path)
}
