//! Table of contents from rendered blocks

use serde::Serialize;

use crate::content::{plain_text, ContentBlock};

/// An in-page anchor for a section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
}

/// Collect the anchored (level 2) headings in document order
pub fn table_of_contents(blocks: &[ContentBlock]) -> Vec<TocEntry> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Heading {
                level: 2,
                id: Some(id),
                runs,
            } if !id.is_empty() => Some(TocEntry {
                id: id.clone(),
                title: plain_text(runs),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::render_markdown;

    #[test]
    fn test_table_of_contents() {
        let blocks = render_markdown("# Top\n## A falácia do **DRY**\ntext\n### Sub\n## Contexto é Rei\n## !!!");
        let toc = table_of_contents(&blocks);
        assert_eq!(
            toc,
            vec![
                TocEntry {
                    id: "a-fal-cia-do-dry".to_string(),
                    title: "A falácia do DRY".to_string(),
                },
                TocEntry {
                    id: "contexto-rei".to_string(),
                    title: "Contexto é Rei".to_string(),
                },
            ]
        );
    }
}
