//! Configuration module for storebook
//!
//! - Path resolution (env override or platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::StorebookPaths;
pub use settings::Settings;
