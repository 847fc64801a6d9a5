//! Configuration module

mod site;

pub use site::AiConfig;
pub use site::BlogConfig;
pub use site::HighlightConfig;
pub use site::API_KEY_VARS;
