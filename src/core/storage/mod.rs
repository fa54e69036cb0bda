//! Client-side state backing the session.
//!
//! # Architecture
//!
//! - **KeyValueStore**: durable string storage (`FileStore`, `MemoryStore`)
//! - **CookieJar**: browser-like cookies with max age
//! - **SessionStore**: owns the auth token across cache, storage and cookie
//!
//! # On-disk layout
//!
//! ```text
//! {data_dir}/
//! ├── local_storage.json   # durable storage, holds "authToken"
//! └── cookies.json         # cookie jar, holds the "authToken" cookie
//! ```

mod cookie;
mod kv;
mod session;

pub use cookie::{CookieJar, SameSite, SessionCookie, AUTH_COOKIE};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::{SessionStatus, SessionStore, AUTH_TOKEN_KEY};
