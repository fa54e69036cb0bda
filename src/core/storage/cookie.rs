//! Cookie view of the session.
//!
//! The route guard runs in a context that shares nothing with the
//! API-calling side except cookies, so the jar mirrors browser
//! semantics: cookies carry a max age and disappear for readers once
//! it has elapsed.

use crate::core::error::Result;
use crate::core::storage::kv::KeyValueStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Name of the cookie carrying the auth token
pub const AUTH_COOKIE: &str = "authToken";

/// Cross-site policy. The session cookie is only ever sent same-site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => f.write_str("Strict"),
        }
    }
}

/// A cookie as the client set it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age_sec: u64,
    pub same_site: SameSite,
    pub issued_at: DateTime<Utc>,
}

impl SessionCookie {
    /// Cookie scoped to `/` with `SameSite=Strict`, issued now
    pub fn new(name: &str, value: &str, max_age_sec: u64) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            max_age_sec,
            same_site: SameSite::Strict,
            issued_at: Utc::now(),
        }
    }

    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.max_age_sec).unwrap_or(i64::MAX);
        Duration::try_seconds(secs)
            .and_then(|ttl| self.issued_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// `Set-Cookie` rendering, e.g.
    /// `authToken=abc; Path=/; Max-Age=86400; SameSite=Strict`
    pub fn to_set_cookie(&self) -> String {
        format!(
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            self.name, self.value, self.path, self.max_age_sec, self.same_site
        )
    }
}

/// Persistent cookie jar
#[derive(Clone)]
pub struct CookieJar {
    store: Arc<dyn KeyValueStore>,
}

impl CookieJar {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn set(&self, cookie: &SessionCookie) -> Result<()> {
        self.store
            .set(&cookie.name, &serde_json::to_string(cookie)?)
    }

    /// Expire a cookie immediately
    pub fn expire(&self, name: &str) -> Result<()> {
        self.store.remove(name)
    }

    /// Live cookie by name as of `now`; expired cookies are purged
    pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> Result<Option<SessionCookie>> {
        let Some(cookie) = self.peek(name)? else {
            return Ok(None);
        };

        if cookie.is_expired_at(now) {
            tracing::debug!("Cookie '{}' expired at {}", name, cookie.expires_at());
            if let Err(e) = self.store.remove(name) {
                tracing::warn!("Failed to purge expired cookie '{}': {}", name, e);
            }
            return Ok(None);
        }

        Ok(Some(cookie))
    }

    pub fn get(&self, name: &str) -> Result<Option<SessionCookie>> {
        self.get_at(name, Utc::now())
    }

    /// Cookie even if expired, for diagnostics. Malformed entries are
    /// dropped.
    pub fn peek(&self, name: &str) -> Result<Option<SessionCookie>> {
        let Some(raw) = self.store.get(name)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(cookie) => Ok(Some(cookie)),
            Err(e) => {
                tracing::warn!("Dropping malformed cookie '{}': {}", name, e);
                if let Err(e) = self.store.remove(name) {
                    tracing::warn!("Failed to purge malformed cookie '{}': {}", name, e);
                }
                Ok(None)
            }
        }
    }

    /// `Cookie` request header built from every live cookie, as the
    /// guard would receive it
    pub fn header_at(&self, now: DateTime<Utc>) -> Result<Option<String>> {
        let mut pairs = Vec::new();
        for name in self.store.keys()? {
            if let Some(cookie) = self.get_at(&name, now)? {
                pairs.push(format!("{}={}", cookie.name, cookie.value));
            }
        }

        Ok((!pairs.is_empty()).then(|| pairs.join("; ")))
    }

    pub fn header(&self) -> Result<Option<String>> {
        self.header_at(Utc::now())
    }
}
