//! Session token ownership.
//!
//! The token is observed through three views:
//!
//! - the in-process cache read by API calls,
//! - durable client storage, read once at startup by [`SessionStore::init`],
//! - the `authToken` cookie, the only view the route guard can see.
//!
//! `set` and `clear` touch all three in one call. The cookie's max
//! age is not mirrored onto the other two views: once it elapses the
//! guard denies navigation while the cache and durable storage still
//! hold the token. That window is reported by [`SessionStore::status`]
//! and closes on the next explicit logout or on a backend rejection.

use crate::core::error::{LookupError, Result};
use crate::core::storage::cookie::{CookieJar, SessionCookie, AUTH_COOKIE};
use crate::core::storage::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Durable storage key holding the auth token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Snapshot of every view of the session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub cached: bool,
    pub durable: bool,
    pub cookie: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_expires_at: Option<DateTime<Utc>>,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        self.cached
    }

    /// Views disagree, e.g. the cookie expired under a cached token
    pub fn is_divergent(&self) -> bool {
        !(self.cached == self.durable && self.durable == self.cookie)
    }
}

/// Owner of the auth token
pub struct SessionStore {
    cache: RwLock<Option<String>>,
    durable: Arc<dyn KeyValueStore>,
    cookies: CookieJar,
    cookie_max_age_sec: u64,
}

impl SessionStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, cookies: CookieJar, cookie_max_age_sec: u64) -> Self {
        Self {
            cache: RwLock::new(None),
            durable,
            cookies,
            cookie_max_age_sec,
        }
    }

    /// Cached token, if any
    pub fn get(&self) -> Option<String> {
        self.cache.read().ok().and_then(|token| token.clone())
    }

    /// Rehydrate the cache from durable storage.
    ///
    /// Must run once before any authenticated call. Leaves the cookie
    /// alone.
    pub fn init(&self) -> Result<()> {
        match self.durable.get(AUTH_TOKEN_KEY)? {
            Some(token) => {
                self.write_cache(Some(token))?;
                tracing::info!("Rehydrated session from durable storage");
            }
            None => tracing::debug!("No stored session to rehydrate"),
        }
        Ok(())
    }

    /// Install `token` in all three views.
    ///
    /// Every view is attempted even if an earlier one fails; the first
    /// failure is returned.
    pub fn set(&self, token: &str) -> Result<()> {
        let cache = self.write_cache(Some(token.to_string()));
        let durable = self.durable.set(AUTH_TOKEN_KEY, token);
        let cookie = self
            .cookies
            .set(&SessionCookie::new(AUTH_COOKIE, token, self.cookie_max_age_sec));

        tracing::info!("Session installed (token {})", redact(token));
        first_failure("set", [cache, durable, cookie])
    }

    /// Remove the token from all three views
    pub fn clear(&self) -> Result<()> {
        let cache = self.write_cache(None);
        let durable = self.durable.remove(AUTH_TOKEN_KEY);
        let cookie = self.cookies.expire(AUTH_COOKIE);

        tracing::info!("Session cleared");
        first_failure("clear", [cache, durable, cookie])
    }

    /// Token as held by durable storage
    pub fn durable_token(&self) -> Result<Option<String>> {
        self.durable.get(AUTH_TOKEN_KEY)
    }

    /// Token as carried by a live cookie
    pub fn cookie_token(&self) -> Result<Option<String>> {
        Ok(self.cookies.get(AUTH_COOKIE)?.map(|c| c.value))
    }

    /// The jar shared with the route guard
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn status(&self) -> Result<SessionStatus> {
        let cookie = self.cookies.get(AUTH_COOKIE)?;
        Ok(SessionStatus {
            cached: self.get().is_some(),
            durable: self.durable_token()?.is_some(),
            cookie: cookie.is_some(),
            cookie_expires_at: cookie.map(|c| c.expires_at()),
        })
    }

    fn write_cache(&self, token: Option<String>) -> Result<()> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| LookupError::Storage("session cache lock poisoned".to_string()))?;
        *cache = token;
        Ok(())
    }
}

fn first_failure<const N: usize>(op: &str, results: [Result<()>; N]) -> Result<()> {
    let mut first = None;
    for result in results {
        if let Err(e) = result {
            tracing::warn!("Session {} left a view unsynchronized: {}", op, e);
            first.get_or_insert(e);
        }
    }
    first.map_or(Ok(()), Err)
}

/// Short, log-safe form of a token
fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}…")
}
