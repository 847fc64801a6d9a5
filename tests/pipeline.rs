//! Import → stage → publish → render, through the public API

use draftpress::admin::{publish_staged, ContentLoader, Staging};
use draftpress::content::{render_markdown, ContentBlock, InlineRun, PostStatus};
use draftpress::helpers::{render_blocks, table_of_contents, Highlighter};
use draftpress::store::{JsonPostStore, PostStore};
use std::fs;
use tempfile::TempDir;

const ARTICLE: &str = r#"---
title: "Entendendo o React Fiber"
category: Frontend
tags: ["react", 'fiber', internals]
status: published
date: 2024-02-10
read_time: 8 min read
---

# Entendendo o React Fiber

O **Fiber** é o novo *reconciler* do React.

## Como Funciona?

> Trabalho incremental.

```js
const fiber = { child: null };
```

- `beginWork`
- `completeWork`

---

Leia a [documentação](https://react.dev).
"#;

#[test]
fn test_import_publish_render() {
    let dir = TempDir::new().unwrap();
    let content_dir = dir.path().join("content");
    fs::create_dir_all(&content_dir).unwrap();
    fs::write(content_dir.join("react-fiber.md"), ARTICLE).unwrap();
    fs::write(content_dir.join("cover.png"), [0u8, 1, 2]).unwrap();

    // Import
    let report = ContentLoader::new().import_paths(&[&content_dir]);
    assert_eq!(report.posts.len(), 1);
    assert_eq!(report.skipped.len(), 1);

    let post = &report.posts[0];
    assert_eq!(post.title, "Entendendo o React Fiber");
    assert_eq!(post.slug, "entendendo-o-react-fiber");
    assert_eq!(post.tags, vec!["react", "fiber", "internals"]);
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.read_time, "8 min read");
    assert_eq!(post.filename, "react-fiber.md");

    // Stage and publish
    let data_dir = dir.path().join(".draftpress");
    let mut staging = Staging::load(&data_dir).unwrap();
    staging.stage_all(report.posts.clone());
    let mut store = JsonPostStore::open(&data_dir).unwrap();
    let published = publish_staged(&mut store, &mut staging, "author-1").unwrap();
    assert!(published.is_complete());
    assert!(staging.is_empty());

    // Render what the store holds
    let record = store.get("entendendo-o-react-fiber").unwrap().unwrap();
    let blocks = render_markdown(&record.content);

    assert_eq!(
        blocks[1],
        ContentBlock::Paragraph {
            runs: vec![
                InlineRun::text("O "),
                InlineRun::bold("Fiber"),
                InlineRun::text(" é o novo "),
                InlineRun::italic("reconciler"),
                InlineRun::text(" do React."),
            ]
        }
    );
    assert!(matches!(
        &blocks[2],
        ContentBlock::Heading { level: 2, id: Some(id), .. } if id == "como-funciona"
    ));
    assert!(matches!(
        &blocks[4],
        ContentBlock::CodeBlock { language, raw_text }
            if language == "js" && raw_text == "const fiber = { child: null };"
    ));
    assert!(blocks.contains(&ContentBlock::Rule));

    let toc = table_of_contents(&blocks);
    assert_eq!(toc.len(), 1);
    assert_eq!(toc[0].title, "Como Funciona?");

    let html = render_blocks(&blocks, &Highlighter::with_options("base16-ocean.dark", false));
    assert!(html.contains(r#"<h2 id="como-funciona">Como Funciona?</h2>"#));
    assert!(html.contains("<ul>\n<li><code>beginWork</code></li>\n<li><code>completeWork</code></li>\n</ul>"));
    assert!(html.contains(
        r#"<a href="https://react.dev" target="_blank" rel="noopener noreferrer">documentação</a>"#
    ));
}
