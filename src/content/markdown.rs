//! Line-oriented Markdown rendering into content blocks
//!
//! This is a small subset of Markdown: ATX headings up to
//! level 3, fenced code, single-line blockquotes and list items, rules and
//! paragraphs. The renderer is total: every input produces some block list.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::inline::{parse_inline, plain_text, InlineRun};
use super::slug::heading_id;

lazy_static! {
    static ref FENCE_LANGUAGE: Regex = Regex::new(r"^```(\w+)").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^(\d+)\. ").unwrap();
}

const DEFAULT_CODE_LANGUAGE: &str = "text";

/// A rendering instruction produced from post content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        runs: Vec<InlineRun>,
    },
    Paragraph {
        runs: Vec<InlineRun>,
    },
    CodeBlock {
        language: String,
        raw_text: String,
    },
    Blockquote {
        runs: Vec<InlineRun>,
    },
    ListItem {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<u64>,
        runs: Vec<InlineRun>,
    },
    Rule,
}

impl ContentBlock {
    /// Visible text of the block (raw text for code blocks)
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Heading { runs, .. }
            | ContentBlock::Paragraph { runs }
            | ContentBlock::Blockquote { runs }
            | ContentBlock::ListItem { runs, .. } => plain_text(runs),
            ContentBlock::CodeBlock { raw_text, .. } => raw_text.clone(),
            ContentBlock::Rule => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InCodeBlock,
}

/// Accumulates blocks while walking the input lines
struct BlockBuilder<'a> {
    blocks: Vec<ContentBlock>,
    mode: Mode,
    paragraph: Vec<&'a str>,
    code_lines: Vec<&'a str>,
    language: String,
}

impl<'a> BlockBuilder<'a> {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            mode: Mode::Normal,
            paragraph: Vec::new(),
            code_lines: Vec::new(),
            language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }

        let joined = self.paragraph.join(" ");
        let text = joined.trim();
        if !text.is_empty() {
            self.blocks.push(ContentBlock::Paragraph {
                runs: parse_inline(text),
            });
        }
        self.paragraph.clear();
    }

    fn open_code_block(&mut self, fence: &str) {
        self.flush_paragraph();
        self.language = FENCE_LANGUAGE
            .captures(fence)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string());
        self.mode = Mode::InCodeBlock;
    }

    fn close_code_block(&mut self) {
        self.blocks.push(ContentBlock::CodeBlock {
            language: std::mem::replace(&mut self.language, DEFAULT_CODE_LANGUAGE.to_string()),
            raw_text: self.code_lines.join("\n"),
        });
        self.code_lines.clear();
        self.mode = Mode::Normal;
    }

    fn push_block(&mut self, block: ContentBlock) {
        self.flush_paragraph();
        self.blocks.push(block);
    }

    fn line(&mut self, line: &'a str) {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            match self.mode {
                Mode::Normal => self.open_code_block(trimmed),
                Mode::InCodeBlock => self.close_code_block(),
            }
            return;
        }

        if self.mode == Mode::InCodeBlock {
            self.code_lines.push(line);
            return;
        }

        if let Some(rest) = line.strip_prefix("# ") {
            self.push_block(heading(1, rest));
        } else if let Some(rest) = line.strip_prefix("## ") {
            self.push_block(heading(2, rest));
        } else if let Some(rest) = line.strip_prefix("### ") {
            self.push_block(heading(3, rest));
        } else if let Some(rest) = line.strip_prefix("> ") {
            self.push_block(ContentBlock::Blockquote {
                runs: parse_inline(rest),
            });
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            self.push_block(ContentBlock::ListItem {
                ordered: false,
                index: None,
                runs: parse_inline(rest),
            });
        } else if let Some((index, rest)) = ordered_item(trimmed) {
            self.push_block(ContentBlock::ListItem {
                ordered: true,
                index: Some(index),
                runs: parse_inline(rest),
            });
        } else if trimmed == "---" || trimmed == "***" {
            self.push_block(ContentBlock::Rule);
        } else if trimmed.is_empty() {
            self.flush_paragraph();
        } else {
            self.paragraph.push(line);
        }
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        self.flush_paragraph();
        if self.mode == Mode::InCodeBlock {
            self.close_code_block();
        }
        self.blocks
    }
}

fn heading(level: u8, text: &str) -> ContentBlock {
    let id = (level == 2).then(|| heading_id(text));
    ContentBlock::Heading {
        level,
        id,
        runs: parse_inline(text),
    }
}

/// `12. rest` -> `(12, "rest")`; indexes that overflow are not list markers
fn ordered_item(trimmed: &str) -> Option<(u64, &str)> {
    let caps = ORDERED_ITEM.captures(trimmed)?;
    let whole = caps.get(0)?;
    let index = caps.get(1)?.as_str().parse().ok()?;
    Some((index, &trimmed[whole.end()..]))
}

/// Render post content into an ordered list of blocks
pub fn render_markdown(body: &str) -> Vec<ContentBlock> {
    let mut builder = BlockBuilder::new();
    for line in body.lines() {
        builder.line(line);
    }
    builder.finish()
}
