//! custlookup - customer lookup client
//!
//! Authenticated search over a bank's customer records: token
//! persistence across three storage views, cookie-gated routing, query
//! classification, debounced live suggestions and highlighted results.
//!
//! # Architecture
//!
//! - **core**: Domain logic (frontend-agnostic)
//!   - config, error, types, xdg
//!   - storage (durable store, cookie jar, session)
//!   - guard (route gating)
//!   - api, auth (backend client and flows)
//!   - search (classify, highlight, suggest, controller)
//!   - services (unified service container)
//!
//! - **cli**: clap adapter (depends on core)

pub mod cli;
pub mod core;

pub use core::config::Config;
pub use core::error::{LookupError, Result};
pub use core::services::Services;
pub use core::storage::{SessionStatus, SessionStore};
pub use core::types::*;
