//! Publishing staged posts to the post store

use thiserror::Error;

use super::Staging;
use crate::store::{NewPost, PostRecord, PostStore};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("An author id is required to publish (set author_id or pass --author)")]
    MissingAuthor,

    #[error("Nothing is staged")]
    NothingStaged,
}

/// Outcome of a publish run
#[derive(Debug, Default)]
pub struct PublishReport {
    pub published: Vec<PostRecord>,
    /// (title, reason) for each post the store rejected
    pub failed: Vec<(String, String)>,
}

impl PublishReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Insert every staged post into `store` on behalf of `author_id`.
///
/// Posts are inserted one at a time; a rejected post doesn't stop the rest.
/// Published posts leave the staging list, failed ones stay for another try.
pub fn publish_staged(
    store: &mut dyn PostStore,
    staging: &mut Staging,
    author_id: &str,
) -> Result<PublishReport, PublishError> {
    let author_id = author_id.trim();
    if author_id.is_empty() {
        return Err(PublishError::MissingAuthor);
    }
    if staging.is_empty() {
        return Err(PublishError::NothingStaged);
    }

    let mut report = PublishReport::default();
    // one flag per staged position; slugs can repeat within a batch
    let mut keep = Vec::with_capacity(staging.len());

    for post in staging.iter() {
        match store.create(NewPost::from_parsed(post, author_id)) {
            Ok(record) => {
                tracing::info!("Published \"{}\" as /{}", record.title, record.slug);
                keep.push(false);
                report.published.push(record);
            }
            Err(e) => {
                tracing::error!("Failed to publish \"{}\": {}", post.title, e);
                keep.push(true);
                report.failed.push((post.title.clone(), e.to_string()));
            }
        }
    }

    if report.is_complete() {
        staging.clear();
    } else {
        let mut keep = keep.into_iter();
        staging.retain(|_| keep.next().unwrap_or(true));
    }

    Ok(report)
}
