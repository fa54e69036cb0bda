//! HttpApi against an in-process backend
//!
//! The backend is a small axum app bound to an ephemeral port. It
//! echoes the query parameter it received so tests can check how the
//! client classified each identifier.

use crate::common::memory_session;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use custlookup::core::api::{CustomerApi, HttpApi};
use custlookup::core::auth;
use custlookup::core::config::ApiConfig;
use custlookup::core::guard::Route;
use custlookup::core::search::{QueryKind, SearchController, SearchOutcome};
use custlookup::core::storage::SessionStore;
use custlookup::core::types::{Credentials, RegisterForm};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const GOOD_TOKEN: &str = "tok-123";

async fn register(Json(body): Json<Value>) -> Response {
    // The confirmation field must never leave the client
    if body.get("confirm_password").is_some() || body.get("confirmPassword").is_some() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Unexpected field"})))
            .into_response();
    }

    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::CONFLICT,
            Json(json!({"message": "Username already exists"})),
        )
            .into_response(),
        _ => (StatusCode::CREATED, Json(json!({"message": "User registered"}))).into_response(),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("crash"), _) => (StatusCode::INTERNAL_SERVER_ERROR, "").into_response(),
        (Some("tokenless"), _) => Json(json!({"user": "tokenless"})).into_response(),
        (_, Some("good")) => Json(json!({"token": GOOD_TOKEN})).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn customers(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid token"})),
        )
            .into_response();
    }

    let Some((key, value)) = params.into_iter().next() else {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Missing identifier"})))
            .into_response();
    };

    match value.as_str() {
        "nobody" => Json(json!({"data": []})).into_response(),
        "nodata" => Json(json!({"status": "ok"})).into_response(),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Database unavailable"})),
        )
            .into_response(),
        _ => Json(json!({
            "data": [{
                "name": format!("{key}={value}"),
                "email": null,
                "bank_accounts": [{"account_number": 12345, "balance": "10.50"}],
                "pockets": null,
                "term_deposits": [{"amount": 2500, "duration": 12.0}]
            }]
        }))
        .into_response(),
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/customers", get(customers));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> (HttpApi, Arc<SessionStore>) {
    let base_url = spawn_backend().await;
    let session = memory_session();
    let config = ApiConfig {
        base_url,
        request_timeout_sec: 5,
    };
    let api = HttpApi::new(&config, Arc::clone(&session)).unwrap();
    (api, session)
}

fn creds(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_installs_token_everywhere() {
    let (api, session) = client().await;

    let response = auth::login(&api, &session, &creds("teller", "good"))
        .await
        .unwrap();

    assert_eq!(response.token.as_deref(), Some(GOOD_TOKEN));
    assert_eq!(session.get().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(session.durable_token().unwrap().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(session.cookie_token().unwrap().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn test_login_rejected_uses_backend_message() {
    let (api, session) = client().await;

    let err = api.login(&creds("teller", "bad")).await.unwrap_err();

    assert_eq!(err.message(), "Invalid credentials");
    assert_eq!(session.get(), None);
}

#[tokio::test]
async fn test_login_error_without_body_uses_fallback() {
    let (api, _session) = client().await;

    let err = api.login(&creds("crash", "good")).await.unwrap_err();
    assert_eq!(err.message(), "Login failed");
}

#[tokio::test]
async fn test_login_without_token_keeps_extra_fields() {
    let (api, session) = client().await;

    let response = auth::login(&api, &session, &creds("tokenless", "x"))
        .await
        .unwrap();

    assert_eq!(response.token, None);
    assert_eq!(response.extra.get("user"), Some(&json!("tokenless")));
    assert_eq!(session.get(), None);
}

#[tokio::test]
async fn test_register_sends_credentials_only() {
    let (api, _session) = client().await;
    let form = RegisterForm {
        username: "newbie".to_string(),
        password: "pw".to_string(),
        confirm_password: "pw".to_string(),
    };

    let body = auth::register(&api, &form).await.unwrap();
    assert_eq!(body["message"], "User registered");
}

#[tokio::test]
async fn test_register_conflict_message() {
    let (api, _session) = client().await;

    let err = api.register(&creds("taken", "pw")).await.unwrap_err();
    assert_eq!(err.user_message("Registration failed"), "Username already exists");
}

#[tokio::test]
async fn test_search_classifies_identifier() {
    let (api, session) = client().await;
    session.set(GOOD_TOKEN).unwrap();

    let cases = [
        ("jane@bank.io", "email=jane@bank.io"),
        ("12345", "account_number=12345"),
        ("Jane Doe", "name=Jane Doe"),
    ];

    for (query, echoed) in cases {
        let customers = api.search_customers(query, None).await.unwrap();
        assert_eq!(customers.len(), 1, "query {query:?}");
        assert_eq!(customers[0].name.as_deref(), Some(echoed));
    }
}

#[tokio::test]
async fn test_search_explicit_kind_wins() {
    let (api, session) = client().await;
    session.set(GOOD_TOKEN).unwrap();

    let customers = api
        .search_customers("12345", Some(QueryKind::Name))
        .await
        .unwrap();
    assert_eq!(customers[0].name.as_deref(), Some("name=12345"));
}

#[tokio::test]
async fn test_search_decodes_loose_fields() {
    let (api, session) = client().await;
    session.set(GOOD_TOKEN).unwrap();

    let customers = api.search_customers("Jane", None).await.unwrap();
    let customer = &customers[0];

    assert_eq!(customer.email, None);
    assert_eq!(customer.primary_account_number(), Some("12345"));
    assert_eq!(customer.primary_balance(), Some(10.5));
    assert!(customer.pockets.is_empty());
    assert_eq!(customer.term_deposits.len(), 1);
    assert_eq!(customer.term_deposits[0].amount, Some(2500.0));
    assert_eq!(customer.term_deposits[0].duration, Some(12));
}

#[tokio::test]
async fn test_search_empty_and_missing_data() {
    let (api, session) = client().await;
    session.set(GOOD_TOKEN).unwrap();

    assert!(api.search_customers("nobody", None).await.unwrap().is_empty());
    assert!(api.search_customers("nodata", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_backend_failure() {
    let (api, session) = client().await;
    session.set(GOOD_TOKEN).unwrap();

    let err = api.search_customers("boom", None).await.unwrap_err();
    assert_eq!(err.message(), "Database unavailable");
}

#[tokio::test]
async fn test_search_rejected_token_is_auth_required() {
    let (api, session) = client().await;
    session.set("stale").unwrap();

    let err = api.search_customers("Jane", None).await.unwrap_err();
    assert!(err.is_auth_required());
}

#[tokio::test]
async fn test_controller_redirects_on_rejected_token() {
    let (api, session) = client().await;
    session.set("stale").unwrap();

    let mut controller = SearchController::new(Arc::new(api), Arc::clone(&session));
    let outcome = controller.submit("Jane", None).await;

    assert_eq!(outcome, SearchOutcome::Redirect { to: Route::Login });
    assert_eq!(session.get(), None);
    assert_eq!(session.cookie_token().unwrap(), None);
}
