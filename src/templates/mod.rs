//! Built-in page templates using the Tera template engine
//!
//! The templates are embedded in the binary; article bodies are rendered
//! to HTML by the block renderer before they reach Tera.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::BlogConfig;
use crate::content::{render_markdown, ParsedPost};
use crate::helpers::{format_post_date, render_blocks, table_of_contents, Highlighter};
use crate::store::PostRecord;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
    highlighter: Highlighter,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &BlogConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("article.html", include_str!("site/article.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self {
            tera,
            site: SiteData::from(config),
            highlighter: Highlighter::from_config(&config.highlight),
        })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Article body as HTML, without the page around it
    pub fn render_body(&self, markdown: &str) -> String {
        render_blocks(&render_markdown(markdown), &self.highlighter)
    }

    /// Full article page
    pub fn render_article(&self, post: &PostView, markdown: &str) -> Result<String> {
        let blocks = render_markdown(markdown);

        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("post", post);
        context.insert("toc", &table_of_contents(&blocks));
        context.insert("body", &render_blocks(&blocks, &self.highlighter));
        self.render("article.html", &context)
    }

    /// Index page listing `posts` in the given order
    pub fn render_index(&self, posts: &[PostView]) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: format a post date with a chrono format string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%Y-%m-%d".to_string(),
    };
    Ok(tera::Value::String(format_post_date(&s, &format)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub language: String,
    pub date_format: String,
}

impl From<&BlogConfig> for SiteData {
    fn from(config: &BlogConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            language: config.language.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

/// Post metadata shown on pages
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub status: String,
    pub date: String,
}

impl From<&ParsedPost> for PostView {
    fn from(post: &ParsedPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            read_time: post.read_time.clone(),
            status: post.status.to_string(),
            date: post.date.clone(),
        }
    }
}

impl From<&PostRecord> for PostView {
    fn from(record: &PostRecord) -> Self {
        Self {
            title: record.title.clone(),
            slug: record.slug.clone(),
            excerpt: record.excerpt.clone(),
            category: record.category.clone(),
            tags: record.tags.clone(),
            read_time: record.read_time.clone(),
            status: record.status.to_string(),
            date: record.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
