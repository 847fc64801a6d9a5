//! Content module - front-matter import, block rendering and inline spans

mod frontmatter;
mod inline;
pub mod loader;
mod markdown;
mod post;
mod slug;

pub use frontmatter::{
    parse_front_matter, parse_front_matter_on, FrontMatter, HeaderKey, HeaderValue,
    DEFAULT_CATEGORY, DEFAULT_READ_TIME,
};
pub use inline::{parse_inline, plain_text, InlineRun};
pub use markdown::{render_markdown, ContentBlock};
pub use post::{ParsedPost, PostStatus};
pub use slug::{generate_slug, heading_id};
