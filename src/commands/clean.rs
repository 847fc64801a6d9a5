//! Clean the staging list and autosaved drafts

use anyhow::Result;
use std::fs;

use crate::admin::{DraftStore, Staging};
use crate::Workspace;

/// Remove the staging list and autosaved drafts; the post store is kept
pub fn run(workspace: &Workspace) -> Result<()> {
    let staging = Staging::load(&workspace.data_dir)?;
    let drafts = DraftStore::new(&workspace.data_dir);

    for path in [staging.path(), drafts.path()] {
        if path.exists() {
            fs::remove_file(path)?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}
