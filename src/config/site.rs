//! Blog configuration (draftpress.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variables checked for the generative API key, in order
pub const API_KEY_VARS: [&str; 2] = ["VITE_API_KEY", "API_KEY"];

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub language: String,

    // Authoring
    /// Author id attached to published posts
    pub author_id: Option<String>,
    pub new_post_name: String,

    // Directory
    /// Where `new` writes Markdown files
    pub posts_dir: String,
    /// Post store, staging list and autosave
    pub data_dir: String,

    // Display
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Generative drafts
    #[serde(default)]
    pub ai: AiConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Code::Omar".to_string(),
            subtitle: String::new(),
            language: "pt-BR".to_string(),

            author_id: None,
            new_post_name: ":title.md".to_string(),

            posts_dir: "posts".to_string(),
            data_dir: ".draftpress".to_string(),

            date_format: "%d/%m/%Y".to_string(),
            highlight: HighlightConfig::default(),

            ai: AiConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Generative text API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,
    pub api_base: String,
    /// Usually left unset in the file and provided through the environment
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl AiConfig {
    /// API key from the config file, else from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .into_iter()
            .chain(API_KEY_VARS.iter().filter_map(|name| lookup(*name)))
            .find(|key| !key.trim().is_empty())
    }
}
