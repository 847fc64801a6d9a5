//! Slug and anchor id derivation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"[\s_-]+").unwrap();
    static ref NON_ID_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a URL-safe slug from a post title
///
/// Characters other than ASCII word characters, whitespace and hyphens are
/// dropped, separator runs collapse to a single `-`. Titles that reduce to
/// nothing (only punctuation, non-Latin script) get a stable
/// `post-<hash>` token instead of an empty slug.
///
/// # Examples
/// ```
/// use draftpress::content::generate_slug;
/// assert_eq!(generate_slug("Hello, World!"), "hello-world");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let collapsed = SEPARATOR_RUNS.replace_all(&stripped, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        return fallback_slug(title);
    }

    slug.to_string()
}

/// Anchor id for a heading, used for in-page links
///
/// # Examples
/// ```
/// use draftpress::content::heading_id;
/// assert_eq!(heading_id("Foo Bar!"), "foo-bar");
/// ```
pub fn heading_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ID_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// 32-bit FNV-1a of the title; stored slugs depend on this output never changing
fn fallback_slug(title: &str) -> String {
    let hash = title.bytes().fold(0x811c_9dc5u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    format!("post-{:08x}", hash)
}
