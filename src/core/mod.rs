//! Core domain logic (frontend-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Customer records and form payloads
//! - **xdg**: XDG directory handling
//! - **storage**: Durable store, cookie jar and the session owner
//! - **guard**: Route gating on the auth cookie
//! - **api**: Backend client
//! - **auth**: Register, login and logout flows
//! - **search**: Classification, highlighting, suggestions, submission
//! - **services**: Unified service container

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

pub use config::Config;
pub use error::{LookupError, Result};
pub use services::Services;
