//! Backend API collaborator.
//!
//! The backend owns credential checks, persistence and authorization.
//! The client only talks to it through [`CustomerApi`], which lets the
//! search pipeline and controller run against an in-process fake.
//!
//! Endpoints:
//!
//! - `POST /register` `{username, password}`
//! - `POST /login` `{username, password}` -> `{token, ...}`
//! - `GET /customers?{email|account_number|name}=<value>` with
//!   `Authorization: Bearer <token>` -> `{data: Customer[]}`
//!
//! Errors come back as `{message}`.

mod client;

pub use client::HttpApi;

use crate::core::error::Result;
use crate::core::search::QueryKind;
use crate::core::types::{Credentials, Customer, LoginResponse};
use async_trait::async_trait;

/// Fallback messages when the backend gives none
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGIN_FAILED: &str = "Login failed";
pub const SEARCH_FAILED: &str = "Failed to fetch customer data";

#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<serde_json::Value>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Look customers up by `identifier`.
    ///
    /// `kind` overrides classification. Fails with `AuthRequired`
    /// before any network call when no session token is present.
    async fn search_customers(
        &self,
        identifier: &str,
        kind: Option<QueryKind>,
    ) -> Result<Vec<Customer>>;
}
