//! Front-matter parsing for imported posts

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::post::{ParsedPost, PostStatus};
use super::slug::generate_slug;
use crate::helpers::today;

const DELIMITER: &str = "---";
const EXCERPT_CHARS: usize = 150;

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// Header keys that map onto [`ParsedPost`] fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKey {
    Title,
    Slug,
    Description,
    Excerpt,
    Category,
    Tags,
    Status,
    ReadTime,
    Date,
}

impl HeaderKey {
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "title" => HeaderKey::Title,
            "slug" => HeaderKey::Slug,
            "description" => HeaderKey::Description,
            "excerpt" => HeaderKey::Excerpt,
            "category" => HeaderKey::Category,
            "tags" => HeaderKey::Tags,
            "status" => HeaderKey::Status,
            "read_time" => HeaderKey::ReadTime,
            "date" => HeaderKey::Date,
            _ => return None,
        };
        Some(key)
    }
}

/// A normalized header value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Text(String),
    List(Vec<String>),
}

impl HeaderValue {
    /// Normalize a raw value: strip one layer of matching quotes, or split a
    /// bracketed list, or keep the text as is.
    pub fn parse(raw: &str) -> Self {
        if let Some(inner) = strip_quotes(raw) {
            return HeaderValue::Text(inner.to_string());
        }

        if raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2 {
            let items = raw[1..raw.len() - 1]
                .split(',')
                .map(|item| item.trim().replace(['"', '\''], ""))
                .filter(|item| !item.is_empty())
                .collect();
            return HeaderValue::List(items);
        }

        HeaderValue::Text(raw.to_string())
    }
}

fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find(|q| raw.starts_with(*q) && raw.ends_with(*q))
        .map(|_| &raw[1..raw.len() - 1])
}

/// Front-matter header of an imported document
///
/// Recognized keys are typed; anything else is kept in `extra` (in source
/// order) and never read when building a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub fields: IndexMap<HeaderKey, HeaderValue>,
    pub extra: IndexMap<String, HeaderValue>,
}

impl FrontMatter {
    /// Split a document into its header and body
    ///
    /// Returns the default (empty) header and the full text when the
    /// document does not start with a complete `---` delimited block.
    pub fn parse(content: &str) -> (Self, &str) {
        match split_header(content) {
            Some((header, body)) => (Self::parse_header(header), body),
            None => (FrontMatter::default(), content),
        }
    }

    fn parse_header(header: &str) -> Self {
        let mut fm = FrontMatter::default();

        for line in header.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = HeaderValue::parse(value.trim());
            match HeaderKey::from_name(key) {
                Some(known) => {
                    fm.fields.insert(known, value);
                }
                None => {
                    fm.extra.insert(key.to_string(), value);
                }
            }
        }

        fm
    }

    /// Non-empty text value for a key
    pub fn text(&self, key: HeaderKey) -> Option<&str> {
        match self.fields.get(&key) {
            Some(HeaderValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// List value for a key
    pub fn list(&self, key: HeaderKey) -> Option<&[String]> {
        match self.fields.get(&key) {
            Some(HeaderValue::List(items)) => Some(items),
            _ => None,
        }
    }
}

/// Locate the header block: `---` on the first line, then the next `---` line
fn split_header(content: &str) -> Option<(&str, &str)> {
    let (first, rest) = split_line(content)?;
    if first.trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let mut offset = 0;
    let mut remaining = rest;
    while !remaining.is_empty() {
        let (line, after) = match split_line(remaining) {
            Some(split) => split,
            None => (remaining, ""),
        };
        if line.trim_end_matches('\r') == DELIMITER {
            let header = rest[..offset].trim_end_matches(['\n', '\r']);
            return Some((header, after));
        }
        offset += remaining.len() - after.len();
        remaining = after;
    }

    None
}

/// `(line, rest)` split at the first newline; `None` if there is none
fn split_line(text: &str) -> Option<(&str, &str)> {
    text.split_once('\n')
}

/// Title derived from a source file name: `my-post.md` -> `my post`
fn title_from_source(source_name: &str) -> String {
    let stem = source_name
        .strip_suffix(".md")
        .or_else(|| source_name.strip_suffix(".markdown"))
        .unwrap_or(source_name);
    stem.replace(['-', '_'], " ")
}

fn excerpt_from_body(body: &str) -> String {
    let head: String = body.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}

/// Parse an imported document into a post record, using `today` for a
/// missing date
pub fn parse_front_matter_on(raw: &str, source_name: &str, today: NaiveDate) -> ParsedPost {
    let (fm, body) = FrontMatter::parse(raw);
    let content = body.trim();

    if !fm.extra.is_empty() {
        tracing::debug!(
            "Ignoring unknown front-matter keys in {}: {:?}",
            source_name,
            fm.extra.keys().collect::<Vec<_>>()
        );
    }

    let title = fm
        .text(HeaderKey::Title)
        .map(str::to_string)
        .unwrap_or_else(|| title_from_source(source_name));

    let slug = fm
        .text(HeaderKey::Slug)
        .map(str::to_string)
        .unwrap_or_else(|| generate_slug(&title));

    let excerpt = fm
        .text(HeaderKey::Description)
        .or_else(|| fm.text(HeaderKey::Excerpt))
        .map(str::to_string)
        .unwrap_or_else(|| excerpt_from_body(content));

    ParsedPost {
        title,
        slug,
        excerpt,
        content: content.to_string(),
        category: fm
            .text(HeaderKey::Category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        tags: fm.list(HeaderKey::Tags).map(<[String]>::to_vec).unwrap_or_default(),
        status: fm
            .text(HeaderKey::Status)
            .map(PostStatus::from_header)
            .unwrap_or_default(),
        read_time: fm
            .text(HeaderKey::ReadTime)
            .unwrap_or(DEFAULT_READ_TIME)
            .to_string(),
        date: fm
            .text(HeaderKey::Date)
            .map(str::to_string)
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        filename: source_name.to_string(),
    }
}

/// Parse an imported document into a post record
///
/// Never fails: a document without a usable header is all body, and every
/// missing field gets its default. The default date is today's (UTC) date.
pub fn parse_front_matter(raw: &str, source_name: &str) -> ParsedPost {
    parse_front_matter_on(raw, source_name, today())
}
