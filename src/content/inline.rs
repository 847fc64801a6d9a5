//! Inline span parsing (code, bold, italic, links)

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // Alternation order is significant: code spans win over emphasis, bold
    // over italic. Nothing inside a matched span is scanned again.
    static ref INLINE_SPAN: Regex = Regex::new(
        r"(?x)
          `(?P<code>[^`]+)`
        | \*\*(?P<bold>[^*]+)\*\*
        | \*(?P<italic>[^*]+)\*
        | \[(?P<label>[^\]]+)\]\((?P<href>[^)]+)\)
        "
    )
    .unwrap();
}

/// A formatted run of text within a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineRun {
    Text { text: String },
    Code { text: String },
    Bold { text: String },
    Italic { text: String },
    Link { label: String, href: String },
}

impl InlineRun {
    pub fn text(text: impl Into<String>) -> Self {
        InlineRun::Text { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineRun::Code { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineRun::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineRun::Italic { text: text.into() }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        InlineRun::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    /// The visible text of this run, without markup
    pub fn plain_text(&self) -> &str {
        match self {
            InlineRun::Text { text }
            | InlineRun::Code { text }
            | InlineRun::Bold { text }
            | InlineRun::Italic { text } => text,
            InlineRun::Link { label, .. } => label,
        }
    }
}

/// Split one line of block text into inline runs
///
/// Unterminated markers (a lone `*`, an unclosed backtick) don't match any
/// span and stay in the surrounding text run.
pub fn parse_inline(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in INLINE_SPAN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            runs.push(InlineRun::text(&text[last..whole.start()]));
        }

        let run = if let Some(code) = caps.name("code") {
            InlineRun::code(code.as_str())
        } else if let Some(bold) = caps.name("bold") {
            InlineRun::bold(bold.as_str())
        } else if let Some(italic) = caps.name("italic") {
            InlineRun::italic(italic.as_str())
        } else {
            let label = caps.name("label").map(|m| m.as_str()).unwrap_or_default();
            let href = caps.name("href").map(|m| m.as_str()).unwrap_or_default();
            InlineRun::link(label, href)
        };
        runs.push(run);

        last = whole.end();
    }

    if last < text.len() {
        runs.push(InlineRun::text(&text[last..]));
    }

    runs
}

/// Concatenate the visible text of a run sequence
pub fn plain_text(runs: &[InlineRun]) -> String {
    runs.iter().map(InlineRun::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_mixed() {
        let runs = parse_inline("Use `code` and **bold** and *italic* and [link](http://x)");
        assert_eq!(
            runs,
            vec![
                InlineRun::text("Use "),
                InlineRun::code("code"),
                InlineRun::text(" and "),
                InlineRun::bold("bold"),
                InlineRun::text(" and "),
                InlineRun::italic("italic"),
                InlineRun::text(" and "),
                InlineRun::link("link", "http://x"),
            ]
        );
    }

    #[test]
    fn test_parse_inline_plain() {
        assert_eq!(parse_inline("just text"), vec![InlineRun::text("just text")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_code_span_is_not_rescanned() {
        let runs = parse_inline("`**not bold**`");
        assert_eq!(runs, vec![InlineRun::code("**not bold**")]);
    }

    #[test]
    fn test_adjacent_spans_have_no_empty_text() {
        let runs = parse_inline("**a***b*");
        assert_eq!(runs, vec![InlineRun::bold("a"), InlineRun::italic("b")]);
    }

    #[test]
    fn test_unmatched_markers_pass_through() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![InlineRun::text("2 * 3 = 6")]);
        assert_eq!(parse_inline("a `tick"), vec![InlineRun::text("a `tick")]);
        assert_eq!(parse_inline("[label](no-close"), vec![InlineRun::text("[label](no-close")]);
        assert_eq!(parse_inline("**"), vec![InlineRun::text("**")]);
    }

    #[test]
    fn test_nested_emphasis_is_not_supported() {
        // Bold cannot contain an asterisk, so no bold run comes out of this
        let runs = parse_inline("**bold *inner* bold**");
        assert!(!runs.iter().any(|r| matches!(r, InlineRun::Bold { .. })));
        assert!(runs.iter().any(|r| matches!(r, InlineRun::Italic { .. })));
    }

    #[test]
    fn test_link_label_is_not_rescanned() {
        let runs = parse_inline("see [the *docs*](https://docs.rs)");
        assert_eq!(
            runs,
            vec![
                InlineRun::text("see "),
                InlineRun::link("the *docs*", "https://docs.rs"),
            ]
        );
    }
}
