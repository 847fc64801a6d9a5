//! Post storage
//!
//! [`PostStore`] is the content store the authoring workflow publishes to and
//! the preview server reads from. [`JsonPostStore`] keeps every record in a
//! single JSON file under the data directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::content::{ParsedPost, PostStatus};
use crate::helpers::post_timestamp;

/// Store file name inside the data directory
const STORE_FILE: &str = "posts.json";

/// Errors from the post store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("A post with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("No post with slug '{0}'")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub status: PostStatus,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub status: PostStatus,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build the payload for a parsed post, attributed to `author_id`
    pub fn from_parsed(post: &ParsedPost, author_id: &str) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            read_time: post.read_time.clone(),
            status: post.status,
            author_id: author_id.to_string(),
            created_at: post_timestamp(&post.date),
        }
    }
}

/// Content store collaborator
pub trait PostStore {
    /// Insert a post; slugs are unique
    fn create(&mut self, post: NewPost) -> Result<PostRecord>;

    /// Find a post by slug
    fn get(&self, slug: &str) -> Result<Option<PostRecord>>;

    /// All posts, newest first, optionally filtered by status
    fn list(&self, status: Option<PostStatus>) -> Result<Vec<PostRecord>>;

    /// Replace the editable fields of an existing post
    fn update(&mut self, slug: &str, post: &ParsedPost) -> Result<PostRecord>;

    /// Remove a post; returns the removed record
    fn delete(&mut self, slug: &str) -> Result<PostRecord>;
}

/// Post store backed by a JSON file
#[derive(Debug)]
pub struct JsonPostStore {
    path: PathBuf,
    posts: Vec<PostRecord>,
}

impl JsonPostStore {
    /// Open the store in `data_dir`; a missing file is an empty store
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(STORE_FILE);
        let posts = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Opened post store {:?} ({} posts)", path, posts.len());
        Ok(Self { path, posts })
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.posts)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn position(&self, slug: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.slug == slug)
    }
}

impl PostStore for JsonPostStore {
    fn create(&mut self, post: NewPost) -> Result<PostRecord> {
        if self.position(&post.slug).is_some() {
            return Err(StoreError::DuplicateSlug(post.slug));
        }

        let record = PostRecord {
            id: Uuid::new_v4().to_string(),
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            tags: post.tags,
            read_time: post.read_time,
            status: post.status,
            author_id: post.author_id,
            created_at: post.created_at,
        };
        self.posts.push(record.clone());
        self.save()?;
        Ok(record)
    }

    fn get(&self, slug: &str) -> Result<Option<PostRecord>> {
        Ok(self.position(slug).map(|i| self.posts[i].clone()))
    }

    fn list(&self, status: Option<PostStatus>) -> Result<Vec<PostRecord>> {
        let mut posts: Vec<PostRecord> = self
            .posts
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    fn update(&mut self, slug: &str, post: &ParsedPost) -> Result<PostRecord> {
        let index = self
            .position(slug)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;

        if post.slug != slug && self.position(&post.slug).is_some() {
            return Err(StoreError::DuplicateSlug(post.slug.clone()));
        }

        let record = &mut self.posts[index];
        record.title = post.title.clone();
        record.slug = post.slug.clone();
        record.excerpt = post.excerpt.clone();
        record.content = post.content.clone();
        record.category = post.category.clone();
        record.tags = post.tags.clone();
        record.read_time = post.read_time.clone();
        record.status = post.status;

        let updated = record.clone();
        self.save()?;
        Ok(updated)
    }

    fn delete(&mut self, slug: &str) -> Result<PostRecord> {
        let index = self
            .position(slug)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;
        let removed = self.posts.remove(index);
        self.save()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_front_matter_on;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn parsed(doc: &str) -> ParsedPost {
        let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        parse_front_matter_on(doc, "post.md", day)
    }

    #[test]
    fn test_create_and_reopen() {
        let dir = TempDir::new().unwrap();
        let post = parsed("---\ntitle: First\ndate: 2024-01-10\nstatus: published\n---\nHello");

        let mut store = JsonPostStore::open(dir.path()).unwrap();
        let record = store.create(NewPost::from_parsed(&post, "author-1")).unwrap();
        assert_eq!(record.slug, "first");
        assert_eq!(record.author_id, "author-1");
        assert_eq!(record.created_at.to_rfc3339(), "2024-01-10T00:00:00+00:00");

        let reopened = JsonPostStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("first").unwrap(), Some(record));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonPostStore::open(dir.path()).unwrap();
        let post = parsed("---\ntitle: Same\n---\n");
        store.create(NewPost::from_parsed(&post, "a")).unwrap();
        let err = store.create(NewPost::from_parsed(&post, "a")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "same"));
    }

    #[test]
    fn test_list_filters_and_orders() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonPostStore::open(dir.path()).unwrap();
        for doc in [
            "---\ntitle: Old\ndate: 2023-01-01\nstatus: published\n---\n",
            "---\ntitle: New\ndate: 2024-06-01\nstatus: published\n---\n",
            "---\ntitle: Draft\ndate: 2024-07-01\n---\n",
        ] {
            store.create(NewPost::from_parsed(&parsed(doc), "a")).unwrap();
        }

        let published: Vec<_> = store
            .list(Some(PostStatus::Published))
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(published, vec!["New", "Old"]);
        assert_eq!(store.list(None).unwrap().len(), 3);
        assert_eq!(store.list(Some(PostStatus::Draft)).unwrap()[0].title, "Draft");
    }

    #[test]
    fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonPostStore::open(dir.path()).unwrap();
        let post = parsed("---\ntitle: Before\n---\nv1");
        let created = store.create(NewPost::from_parsed(&post, "a")).unwrap();

        let mut edited = post.clone();
        edited.content = "v2".to_string();
        edited.status = PostStatus::Published;
        let updated = store.update("before", &edited).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content, "v2");
        assert_eq!(updated.status, PostStatus::Published);

        let removed = store.delete("before").unwrap();
        assert_eq!(removed.id, created.id);
        assert!(store.get("before").unwrap().is_none());
        assert!(matches!(store.delete("before"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_store_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE), "{ not json").unwrap();
        assert!(matches!(JsonPostStore::open(dir.path()), Err(StoreError::Serde(_))));
    }
}
