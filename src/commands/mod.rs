//! CLI commands

pub mod clean;
pub mod draft;
pub mod generate;
pub mod import;
pub mod list;
pub mod new;
pub mod publish;
pub mod render;
