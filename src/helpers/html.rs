//! HTML output for rendered content blocks

use html_escape::{encode_double_quoted_attribute, encode_text};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::content::{ContentBlock, InlineRun};

/// Code block highlighter
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl Highlighter {
    /// Create a new highlighter with default settings
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_options(&config.theme, config.line_number)
    }

    /// Highlight a code block
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        let lang_attr = encode_double_quoted_attribute(lang);
        match highlighted {
            Some(html) if self.line_numbers => add_line_numbers(&html, &lang_attr),
            Some(html) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang_attr, html
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang_attr,
                encode_text(code)
            ),
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Add a line-number gutter to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");
    let code_lines = lines.join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}

/// Render inline runs as HTML
pub fn render_runs(runs: &[InlineRun]) -> String {
    let mut out = String::new();
    for run in runs {
        match run {
            InlineRun::Text { text } => out.push_str(&encode_text(text)),
            InlineRun::Code { text } => {
                out.push_str("<code>");
                out.push_str(&encode_text(text));
                out.push_str("</code>");
            }
            InlineRun::Bold { text } => {
                out.push_str("<strong>");
                out.push_str(&encode_text(text));
                out.push_str("</strong>");
            }
            InlineRun::Italic { text } => {
                out.push_str("<em>");
                out.push_str(&encode_text(text));
                out.push_str("</em>");
            }
            InlineRun::Link { label, href } => {
                out.push_str(&format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                    encode_double_quoted_attribute(href),
                    encode_text(label)
                ));
            }
        }
    }
    out
}

/// Render a block sequence as an HTML fragment
///
/// Consecutive list items of the same kind are grouped into one list.
pub fn render_blocks(blocks: &[ContentBlock], highlighter: &Highlighter) -> String {
    let mut out = String::new();
    // Some(ordered) while a list is open
    let mut open_list: Option<bool> = None;

    for block in blocks {
        if let ContentBlock::ListItem { ordered, index, .. } = block {
            if open_list != Some(*ordered) {
                close_list(&mut out, open_list.take());
                match (ordered, index) {
                    (true, Some(start)) if *start != 1 => {
                        out.push_str(&format!("<ol start=\"{}\">\n", start))
                    }
                    (true, _) => out.push_str("<ol>\n"),
                    (false, _) => out.push_str("<ul>\n"),
                }
                open_list = Some(*ordered);
            }
        } else {
            close_list(&mut out, open_list.take());
        }

        match block {
            ContentBlock::Heading { level, id, runs } => {
                let id_attr = id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .map(|id| format!(r#" id="{}""#, encode_double_quoted_attribute(id)))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<h{level}{}>{}</h{level}>\n",
                    id_attr,
                    render_runs(runs),
                    level = level
                ));
            }
            ContentBlock::Paragraph { runs } => {
                out.push_str(&format!("<p>{}</p>\n", render_runs(runs)));
            }
            ContentBlock::Blockquote { runs } => {
                out.push_str(&format!("<blockquote>{}</blockquote>\n", render_runs(runs)));
            }
            ContentBlock::ListItem { runs, .. } => {
                out.push_str(&format!("<li>{}</li>\n", render_runs(runs)));
            }
            ContentBlock::CodeBlock { language, raw_text } => {
                out.push_str(&highlighter.highlight(raw_text, language));
                out.push('\n');
            }
            ContentBlock::Rule => out.push_str("<hr>\n"),
        }
    }

    close_list(&mut out, open_list);
    out
}

fn close_list(out: &mut String, open: Option<bool>) {
    match open {
        Some(true) => out.push_str("</ol>\n"),
        Some(false) => out.push_str("</ul>\n"),
        None => {}
    }
}
