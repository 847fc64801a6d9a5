//! Post models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication state of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Only the literal `published` publishes; anything else is a draft
    pub fn from_header(value: &str) -> Self {
        if value == "published" {
            PostStatus::Published
        } else {
            PostStatus::Draft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post parsed from an imported file or a generated draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPost {
    /// Post title
    pub title: String,

    /// URL-friendly name
    pub slug: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Markdown body
    pub content: String,

    pub category: String,

    pub tags: Vec<String>,

    pub status: PostStatus,

    /// Display string such as "5 min read"
    pub read_time: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    /// Name of the file (or generator) the post came from
    pub filename: String,
}

impl ParsedPost {
    /// Serialize back into a front-matter document that
    /// [`parse_front_matter`](super::parse_front_matter) reads again
    ///
    /// The header has no escaping. A tag containing a comma comes back as
    /// several tags, and quote characters inside a tag are dropped.
    pub fn to_markdown(&self) -> String {
        let tags = self
            .tags
            .iter()
            .map(|t| format!("\"{}\"", header_safe(t)))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "---\ntitle: \"{}\"\nslug: \"{}\"\nexcerpt: \"{}\"\ncategory: \"{}\"\ntags: [{}]\nstatus: {}\nread_time: \"{}\"\ndate: \"{}\"\n---\n\n{}\n",
            header_safe(&self.title),
            header_safe(&self.slug),
            header_safe(&self.excerpt),
            header_safe(&self.category),
            tags,
            self.status,
            header_safe(&self.read_time),
            header_safe(&self.date),
            self.content,
        )
    }
}

/// Header values are single-line; quoting never escapes, so a value keeps
/// its content as long as it has no newline
fn header_safe(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
