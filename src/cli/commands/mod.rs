//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod auth;
pub mod completions;
pub mod config;
pub mod navigate;
pub mod search;
pub mod status;
pub mod suggest;

// Re-export argument types for use in mod.rs
pub use auth::{LoginArgs, LogoutArgs, RegisterArgs};
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use navigate::NavigateArgs;
pub use search::SearchArgs;
pub use status::StatusArgs;
pub use suggest::SuggestArgs;
