//! Generative drafts
//!
//! The generator is an explicit collaborator: commands build a
//! [`GeminiClient`] only when they need one and pass it to the functions
//! below, and tests pass a fake [`TextGenerator`].

mod error;
mod gemini;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use error::{AiError, Result};
pub use gemini::GeminiClient;

use crate::content::{generate_slug, ParsedPost, PostStatus, DEFAULT_READ_TIME};

pub const GENERATED_CATEGORY: &str = "Applied AI";
pub const GENERATED_FILENAME: &str = "ai_generated.md";

/// Shape of the expected response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Free-form Markdown
    Text,
    /// A JSON object
    Json,
}

/// Generative text provider
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, mode: GenerationMode) -> Result<String>;
}

/// A post as returned by structured generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub read_time: Option<String>,
}

fn article_prompt(title: &str, excerpt: &str) -> String {
    format!(
        r#"Write a complete technical blog article for programmers on the topic: "{title}".
Context: {excerpt}

Guidelines:
- Use Markdown.
- Tone: educational, professional but slightly informal ("from dev to dev").
- Include code snippets where appropriate, in fenced blocks with the language specified.
- Use subheadings (H2, H3) for structure.
- End with an inspiring conclusion.
- Skip generic intros like "In this article..."; go straight to the technical point."#
    )
}

fn full_post_prompt(topic: &str) -> String {
    format!(
        r#"Write a complete technical blog post for programmers about: "{topic}".

Respond with a single JSON object with these fields:
- "title": the post title
- "slug": a URL slug (lowercase, hyphen separated)
- "excerpt": one or two sentences summarizing the post
- "content": the full article in Markdown, with H2/H3 subheadings and fenced code blocks that name their language
- "category": one short category name
- "tags": an array of 2 to 5 short tags
- "read_time": estimated reading time such as "7 min read""#
    )
}

/// Generate Markdown content for an existing title and excerpt
pub async fn generate_article_content(
    generator: &dyn TextGenerator,
    title: &str,
    excerpt: &str,
) -> Result<String> {
    tracing::info!("Generating article content for \"{}\"", title);
    generator
        .generate(&article_prompt(title, excerpt), GenerationMode::Text)
        .await
}

/// One-sentence insight for a search query; empty when generation fails
pub async fn generate_search_insights(generator: &dyn TextGenerator, query: &str) -> String {
    let prompt = format!(
        "User search query on a dev blog: \"{query}\". Provide a 1-sentence technical insight or \"did you know\" related to this query. Keep it geeky."
    );
    match generator.generate(&prompt, GenerationMode::Text).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::debug!("Search insight unavailable: {}", e);
            String::new()
        }
    }
}

/// Generate a complete post for a topic
pub async fn generate_full_post(
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<GeneratedPost> {
    tracing::info!("Generating post for \"{}\"", topic);
    let raw = generator
        .generate(&full_post_prompt(topic), GenerationMode::Json)
        .await?;
    Ok(serde_json::from_str(strip_json_fence(&raw))?)
}

/// Models sometimes wrap JSON in a ```json fence despite the mime type
fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Turn a generated post into a staged draft, dated `today`
pub fn draft_from_generated(generated: GeneratedPost, today: NaiveDate) -> ParsedPost {
    let slug = generated
        .slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| generate_slug(&generated.title));

    ParsedPost {
        slug,
        title: generated.title,
        excerpt: generated.excerpt,
        content: generated.content,
        category: generated
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| GENERATED_CATEGORY.to_string()),
        tags: generated
            .tags
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| vec!["AI".to_string(), "Generated".to_string()]),
        status: PostStatus::Published,
        read_time: generated
            .read_time
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
        date: today.format("%Y-%m-%d").to_string(),
        filename: GENERATED_FILENAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned responses and records prompts
    struct FakeGenerator {
        response: std::result::Result<String, ()>,
        prompts: Mutex<Vec<(String, GenerationMode)>>,
    }

    impl FakeGenerator {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str, mode: GenerationMode) -> Result<String> {
            self.prompts.lock().unwrap().push((prompt.to_string(), mode));
            self.response.clone().map_err(|_| AiError::EmptyResponse)
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
    }

    #[tokio::test]
    async fn test_generate_full_post() {
        let fake = FakeGenerator::ok(
            r###"{"title":"Intro to WebAssembly","excerpt":"Wasm basics.","content":"## Why\n\nBecause.","tags":["wasm"]}"###,
        );
        let generated = generate_full_post(&fake, "WebAssembly").await.unwrap();
        assert_eq!(generated.title, "Intro to WebAssembly");
        assert_eq!(generated.tags, Some(vec!["wasm".to_string()]));

        let prompts = fake.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("\"WebAssembly\""));
        assert_eq!(prompts[0].1, GenerationMode::Json);
    }

    #[tokio::test]
    async fn test_generate_full_post_fenced_json() {
        let fake = FakeGenerator::ok("```json\n{\"title\":\"T\",\"content\":\"C\"}\n```");
        let generated = generate_full_post(&fake, "t").await.unwrap();
        assert_eq!(generated.title, "T");
        assert_eq!(generated.excerpt, "");
    }

    #[tokio::test]
    async fn test_generate_full_post_malformed() {
        let fake = FakeGenerator::ok("Sorry, I can't do that.");
        let err = generate_full_post(&fake, "t").await.unwrap_err();
        assert!(matches!(err, AiError::MalformedPost(_)));
    }

    #[tokio::test]
    async fn test_generate_article_content() {
        let fake = FakeGenerator::ok("# Rust\n\nBody");
        let text = generate_article_content(&fake, "Rust", "Why Rust").await.unwrap();
        assert_eq!(text, "# Rust\n\nBody");
        let prompts = fake.prompts.lock().unwrap();
        assert!(prompts[0].0.contains("Context: Why Rust"));
        assert_eq!(prompts[0].1, GenerationMode::Text);
    }

    #[tokio::test]
    async fn test_search_insights_swallow_errors() {
        assert_eq!(generate_search_insights(&FakeGenerator::failing(), "rust").await, "");
        let fake = FakeGenerator::ok("  Rust has no GC.\n");
        assert_eq!(generate_search_insights(&fake, "rust").await, "Rust has no GC.");
    }

    #[test]
    fn test_draft_from_generated_defaults() {
        let generated = GeneratedPost {
            title: "Intro to WebAssembly".to_string(),
            slug: None,
            excerpt: "Wasm basics.".to_string(),
            content: "Body".to_string(),
            category: None,
            tags: None,
            read_time: Some(String::new()),
        };
        let draft = draft_from_generated(generated, day());
        assert_eq!(draft.slug, "intro-to-webassembly");
        assert_eq!(draft.category, "Applied AI");
        assert_eq!(draft.tags, vec!["AI", "Generated"]);
        assert_eq!(draft.status, PostStatus::Published);
        assert_eq!(draft.read_time, "5 min read");
        assert_eq!(draft.date, "2025-02-03");
        assert_eq!(draft.filename, "ai_generated.md");
    }

    #[test]
    fn test_draft_from_generated_keeps_values() {
        let generated = GeneratedPost {
            title: "T".to_string(),
            slug: Some("custom".to_string()),
            excerpt: String::new(),
            content: String::new(),
            category: Some("DevOps".to_string()),
            tags: Some(vec!["k8s".to_string()]),
            read_time: Some("9 min read".to_string()),
        };
        let draft = draft_from_generated(generated, day());
        assert_eq!(draft.slug, "custom");
        assert_eq!(draft.category, "DevOps");
        assert_eq!(draft.tags, vec!["k8s"]);
        assert_eq!(draft.read_time, "9 min read");
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_json_fence(" {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_json_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_json_fence("```\n{}\n```"), "{}");
    }
}
