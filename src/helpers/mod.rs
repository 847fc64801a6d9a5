//! Presentation helpers
//!
//! HTML output for content blocks, table of contents and date handling
//! shared by the CLI, the templates and the preview server.

mod date;
mod html;
mod toc;

pub use date::*;
pub use html::*;
pub use toc::*;
