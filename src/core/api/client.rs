//! HTTP implementation of [`CustomerApi`] over reqwest.

use super::{CustomerApi, LOGIN_FAILED, REGISTER_FAILED, SEARCH_FAILED};
use crate::core::config::ApiConfig;
use crate::core::error::{LookupError, Result};
use crate::core::search::{resolve_kind, QueryKind};
use crate::core::storage::SessionStore;
use crate::core::types::{Credentials, Customer, LoginResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

/// Backend client
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: &Credentials, fallback: &str) -> Result<Value> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("POST {} failed: {}", path, e))?;

        decode(response, fallback).await
    }
}

/// Turn a response into its JSON body, or a `Backend` error carrying
/// the body's `message` (falling back to `fallback`)
async fn decode(response: reqwest::Response, fallback: &str) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body: Option<Value> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback);
        tracing::warn!("Backend returned {}: {}", status, message);
        return Err(LookupError::Backend(message.to_string()));
    }

    body.ok_or_else(|| {
        tracing::warn!("Backend returned {} with a malformed body", status);
        LookupError::Backend(fallback.to_string())
    })
}

#[async_trait]
impl CustomerApi for HttpApi {
    async fn register(&self, credentials: &Credentials) -> Result<Value> {
        self.post_json("/register", credentials, REGISTER_FAILED)
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let body = self.post_json("/login", credentials, LOGIN_FAILED).await?;
        serde_json::from_value(body).map_err(|e| {
            tracing::warn!("Unexpected login body: {}", e);
            LookupError::Backend(LOGIN_FAILED.to_string())
        })
    }

    async fn search_customers(
        &self,
        identifier: &str,
        kind: Option<QueryKind>,
    ) -> Result<Vec<Customer>> {
        let token = self.session.get().ok_or(LookupError::AuthRequired)?;
        let kind = resolve_kind(identifier, kind);

        tracing::debug!("GET /customers?{}=<{} chars>", kind, identifier.len());
        let response = self
            .http
            .get(self.url("/customers"))
            .query(&[(kind.param(), identifier)])
            .bearer_auth(token)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("Customer search failed: {}", e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected the session token");
            return Err(LookupError::AuthRequired);
        }

        let body = decode(response, SEARCH_FAILED).await?;
        match body.get("data") {
            Some(Value::Array(items)) => serde_json::from_value(Value::Array(items.clone()))
                .map_err(|e| {
                    tracing::warn!("Malformed customer list: {}", e);
                    LookupError::Backend(SEARCH_FAILED.to_string())
                }),
            _ => Ok(Vec::new()),
        }
    }
}
