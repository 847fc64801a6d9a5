//! Review autosaved drafts

use anyhow::Result;
use std::path::Path;

use crate::admin::{ContentLoader, DraftStore, Staging, EDITOR_DRAFT_KEY, REVIEW_DRAFT_KEY};
use crate::content::ParsedPost;
use crate::Workspace;

/// Which autosaved draft a command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSlot {
    /// Generated draft waiting for review
    Review,
    /// The editor's work in progress
    Editor,
}

impl DraftSlot {
    pub fn key(self) -> &'static str {
        match self {
            DraftSlot::Review => REVIEW_DRAFT_KEY,
            DraftSlot::Editor => EDITOR_DRAFT_KEY,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DraftSlot::Review => "review",
            DraftSlot::Editor => "editor",
        }
    }
}

/// The draft in `slot`, if any
pub fn load(workspace: &Workspace, slot: DraftSlot) -> Option<ParsedPost> {
    DraftStore::new(&workspace.data_dir).load(slot.key())
}

/// Put a Markdown file into the editor slot
pub fn save_file(workspace: &Workspace, file: &Path) -> Result<ParsedPost> {
    let post = ContentLoader::new().load_post(file)?;
    DraftStore::new(&workspace.data_dir).save(EDITOR_DRAFT_KEY, &post);
    println!("Saved \"{}\" as the editor draft.", post.title);
    Ok(post)
}

/// Print the draft in `slot` as a Markdown document
pub fn show(workspace: &Workspace, slot: DraftSlot) -> Result<()> {
    match load(workspace, slot) {
        Some(post) => print!("{}", post.to_markdown()),
        None => println!("No {} draft.", slot.label()),
    }
    Ok(())
}

/// Move the draft in `slot` to the staging list
pub fn approve(workspace: &Workspace, slot: DraftSlot) -> Result<ParsedPost> {
    let Some(post) = load(workspace, slot) else {
        anyhow::bail!("No {} draft to approve", slot.label());
    };

    let mut staging = Staging::load(&workspace.data_dir)?;
    staging.stage(post.clone());
    staging.save()?;
    DraftStore::new(&workspace.data_dir).clear(slot.key());

    println!("Approved \"{}\"; {} staged.", post.title, staging.len());
    Ok(post)
}

/// Forget the draft in `slot`
pub fn discard(workspace: &Workspace, slot: DraftSlot) -> Result<()> {
    DraftStore::new(&workspace.data_dir).clear(slot.key());
    println!("Discarded the {} draft.", slot.label());
    Ok(())
}
