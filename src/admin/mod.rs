//! Authoring workflow: import, stage, autosave and publish

mod autosave;
mod publish;
mod staging;

pub use autosave::{DraftStore, EDITOR_DRAFT_KEY, REVIEW_DRAFT_KEY};
pub use publish::{publish_staged, PublishError, PublishReport};
pub use staging::Staging;

pub use crate::content::loader::{ContentLoader, ImportReport};
