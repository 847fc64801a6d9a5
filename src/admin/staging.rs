//! Staged posts waiting to be published

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ParsedPost;

/// Staging file name inside the data directory
const STAGING_FILE: &str = "staging.json";

/// Ordered list of posts staged for publishing, persisted as JSON
#[derive(Debug)]
pub struct Staging {
    path: PathBuf,
    posts: Vec<ParsedPost>,
}

impl Staging {
    /// Load the staging list from `data_dir`; a missing file is an empty list
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(STAGING_FILE);
        let posts = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self { path, posts })
    }

    /// Persist the staging list
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.posts)?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stage(&mut self, post: ParsedPost) {
        tracing::info!("Staged \"{}\" (/{})", post.title, post.slug);
        self.posts.push(post);
    }

    pub fn stage_all(&mut self, posts: impl IntoIterator<Item = ParsedPost>) {
        for post in posts {
            self.stage(post);
        }
    }

    /// Remove the post at `index` (as shown by `iter`)
    pub fn remove(&mut self, index: usize) -> Result<ParsedPost> {
        if index >= self.posts.len() {
            bail!(
                "No staged post at index {} ({} staged)",
                index,
                self.posts.len()
            );
        }
        Ok(self.posts.remove(index))
    }

    /// Keep only the posts for which `keep` returns true
    pub fn retain<F: FnMut(&ParsedPost) -> bool>(&mut self, keep: F) {
        self.posts.retain(keep);
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedPost> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
