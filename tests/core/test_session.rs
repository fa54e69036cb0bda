//! Session, route gating and auth flows working together
//!
//! The guard only ever sees the cookie header, so these tests drive
//! the session store and then ask the guard where navigation lands.

use crate::common::{file_session, memory_session, FakeApi};
use chrono::{Duration, Utc};
use custlookup::core::auth;
use custlookup::core::guard::{resolve_navigation, Route};
use custlookup::core::storage::{SessionCookie, AUTH_COOKIE};
use custlookup::core::types::Credentials;
use tempfile::TempDir;

fn creds() -> Credentials {
    Credentials {
        username: "teller".to_string(),
        password: "s3cret".to_string(),
    }
}

fn landing(session: &custlookup::SessionStore, path: &str) -> String {
    let header = session.cookies().header().unwrap();
    resolve_navigation(path, header.as_deref()).landed
}

#[tokio::test]
async fn test_login_opens_search_and_logout_closes_it() {
    let session = memory_session();
    let api = FakeApi::new().with_token("tok-1");

    assert_eq!(landing(&session, "/search"), "/login");

    auth::login(&api, &session, &creds()).await.unwrap();
    assert_eq!(landing(&session, "/search"), "/search");
    assert_eq!(landing(&session, "/login"), "/search");
    assert_eq!(landing(&session, "/"), "/search");

    let route = auth::logout(&session).unwrap();
    assert_eq!(route, Route::Login);
    assert_eq!(landing(&session, "/search"), "/login");
    assert_eq!(landing(&session, "/register"), "/register");
}

#[tokio::test]
async fn test_failed_login_leaves_session_untouched() {
    let session = memory_session();
    let api = FakeApi::new().with_login_error("Invalid credentials");

    let err = auth::login(&api, &session, &creds()).await.unwrap_err();

    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert_eq!(session.get(), None);
    assert_eq!(session.cookies().header().unwrap(), None);
}

#[test]
fn test_token_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first = file_session(dir.path());
    first.set("tok-2").unwrap();
    drop(first);

    let second = file_session(dir.path());
    assert_eq!(second.get().as_deref(), Some("tok-2"));
    assert_eq!(landing(&second, "/search"), "/search");
}

#[test]
fn test_logout_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first = file_session(dir.path());
    first.set("tok-3").unwrap();
    auth::logout(&first).unwrap();
    drop(first);

    let second = file_session(dir.path());
    assert_eq!(second.get(), None);
    assert_eq!(landing(&second, "/search"), "/login");
}

#[test]
fn test_expired_cookie_diverges_from_cached_token() {
    let session = memory_session();
    session.set("tok-4").unwrap();

    // Backdate the cookie past its lifetime
    let expired = SessionCookie::new(AUTH_COOKIE, "tok-4", 60)
        .with_issued_at(Utc::now() - Duration::minutes(5));
    session.cookies().set(&expired).unwrap();

    let status = session.status().unwrap();
    assert!(status.cached);
    assert!(status.durable);
    assert!(!status.cookie);
    assert!(status.is_divergent());

    // The guard follows the cookie, not the cache
    assert_eq!(landing(&session, "/search"), "/login");
    assert_eq!(session.get().as_deref(), Some("tok-4"));
}

#[test]
fn test_guard_ignores_query_and_fragment() {
    let session = memory_session();
    let nav = resolve_navigation("/search?q=jane#top", None);
    assert_eq!(nav.landed, "/login");

    session.set("tok-5").unwrap();
    assert_eq!(landing(&session, "/login?next=/search"), "/search");
}

#[test]
fn test_unmatched_paths_pass_through() {
    let session = memory_session();
    assert_eq!(landing(&session, "/favicon.ico"), "/favicon.ico");
    assert_eq!(landing(&session, "/search/extra"), "/search/extra");
}
