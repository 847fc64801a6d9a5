//! Content loader - reads Markdown files for import

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{parse_front_matter_on, ParsedPost};
use crate::helpers::today;

/// Outcome of importing a set of paths
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Posts parsed from Markdown files, in discovery order
    pub posts: Vec<ParsedPost>,
    /// Files that were not Markdown
    pub skipped: Vec<PathBuf>,
    /// Files that could not be read
    pub failed: Vec<(PathBuf, String)>,
}

/// Loads Markdown files and parses their front-matter
pub struct ContentLoader {
    today: NaiveDate,
}

impl ContentLoader {
    /// Create a loader that dates undated posts today
    pub fn new() -> Self {
        Self { today: today() }
    }

    /// Create a loader with a fixed date for undated posts
    pub fn with_date(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Import files and directories; directories are walked recursively
    pub fn import_paths<P: AsRef<Path>>(&self, paths: &[P]) -> ImportReport {
        let mut report = ImportReport::default();

        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                let mut files: Vec<PathBuf> = WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_file())
                    .map(|e| e.into_path())
                    .collect();
                files.sort();
                for file in files {
                    self.import_file(&file, &mut report);
                }
            } else {
                self.import_file(path, &mut report);
            }
        }

        report
    }

    fn import_file(&self, path: &Path, report: &mut ImportReport) {
        if !is_markdown_file(path) {
            tracing::warn!("Skipped {} (not a Markdown file)", path.display());
            report.skipped.push(path.to_path_buf());
            return;
        }

        match self.load_post(path) {
            Ok(post) => {
                tracing::info!("Parsed: {} -> /{}", path.display(), post.slug);
                report.posts.push(post);
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                report.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<ParsedPost> {
        let content = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled.md");
        Ok(parse_front_matter_on(&content, filename, self.today))
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
