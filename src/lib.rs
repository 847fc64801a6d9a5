//! draftpress: Markdown authoring toolkit for a developer blog
//!
//! The core is a pair of pure parsers: [`content::parse_front_matter`] turns
//! an imported Markdown file into a post, and [`content::render_markdown`]
//! turns a post body into typed content blocks. Around them sit the
//! authoring workflow (staging, autosave, publishing), generative drafts
//! and a preview server.

pub mod admin;
pub mod ai;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "draftpress.yml";

/// A blog workspace: configuration plus resolved directories
#[derive(Clone)]
pub struct Workspace {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Where new Markdown posts are written
    pub posts_dir: PathBuf,
    /// Post store, staging list and autosave
    pub data_dir: PathBuf,
}

impl Workspace {
    /// Open the workspace rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let data_dir = base_dir.join(&config.data_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            data_dir,
        })
    }

    /// Author id for publishing: the explicit one, else the configured one
    pub fn author_id(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .or(self.config.author_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}
