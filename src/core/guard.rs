//! Route-level access gating.
//!
//! The guard intercepts navigation before any page logic runs. It is
//! a stateless function of the requested path and the `Cookie`
//! header; it never sees the in-process cache or durable storage.
//!
//! | public path | cookie token | decision            |
//! |-------------|--------------|---------------------|
//! | no          | no           | redirect to login   |
//! | no          | yes          | allow               |
//! | yes         | no           | allow               |
//! | yes         | yes          | redirect to search  |
//!
//! Paths outside the matcher set pass through untouched.

use crate::core::storage::AUTH_COOKIE;
use serde::Serialize;
use std::fmt;

/// Pages the client knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Register,
    Search,
}

impl Route {
    /// Every path the guard intercepts
    pub const MATCHER: [Route; 3] = [Route::Search, Route::Login, Route::Register];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Search => "/search",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::MATCHER.into_iter().find(|r| r.path() == path)
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of evaluating one navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Path is outside the matcher set
    NotIntercepted,
    Allow,
    Redirect(Route),
}

/// Evaluate a navigation to `path` carrying `cookie_header`
pub fn evaluate(path: &str, cookie_header: Option<&str>) -> GuardDecision {
    let Some(route) = Route::from_path(pathname(path)) else {
        return GuardDecision::NotIntercepted;
    };

    let has_token = cookie_header.and_then(auth_token_from_header).is_some();

    match (route.is_public(), has_token) {
        (false, false) => GuardDecision::Redirect(Route::Login),
        (true, true) => GuardDecision::Redirect(Route::Search),
        _ => GuardDecision::Allow,
    }
}

/// Value of the auth cookie in a `Cookie` header. Empty values count
/// as absent.
pub fn auth_token_from_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == AUTH_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Strip query string and fragment
fn pathname(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub requested: String,
    pub landed: String,
    pub redirects: Vec<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

// Guard redirects always land on an allowed page, so two hops
// (root redirect plus one guard redirect) is the real maximum
const MAX_REDIRECTS: usize = 4;

/// Follow a navigation through the client-side root redirect and the
/// guard until it settles
pub fn resolve_navigation(path: &str, cookie_header: Option<&str>) -> Navigation {
    let mut current = path.to_string();
    let mut redirects = Vec::new();

    // Root always goes to login on load, without consulting the guard
    if pathname(&current) == "/" {
        current = Route::Login.path().to_string();
        redirects.push(current.clone());
    }

    while redirects.len() < MAX_REDIRECTS {
        match evaluate(&current, cookie_header) {
            GuardDecision::Redirect(route) => {
                tracing::debug!("Guard redirected {} -> {}", current, route);
                current = route.path().to_string();
                redirects.push(current.clone());
            }
            GuardDecision::Allow | GuardDecision::NotIntercepted => break,
        }
    }

    Navigation {
        requested: path.to_string(),
        landed: current,
        redirects,
    }
}
