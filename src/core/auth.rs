//! Registration, login and logout flows.

use crate::core::api::CustomerApi;
use crate::core::error::{LookupError, Result};
use crate::core::guard::Route;
use crate::core::storage::SessionStore;
use crate::core::types::{Credentials, LoginResponse, RegisterForm};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const REGISTER_SUCCESS: &str = "Registration successful! Redirecting to login...";

/// Register a new account.
///
/// The confirmation field is checked locally and never sent.
pub async fn register(api: &dyn CustomerApi, form: &RegisterForm) -> Result<serde_json::Value> {
    if form.password != form.confirm_password {
        return Err(LookupError::Validation(PASSWORD_MISMATCH.to_string()));
    }

    let body = api.register(&form.credentials()).await?;
    tracing::info!("Registered user '{}'", form.username);
    Ok(body)
}

/// Log in and install the returned token in every session view.
///
/// A success body without a token leaves the session untouched.
pub async fn login(
    api: &dyn CustomerApi,
    session: &SessionStore,
    credentials: &Credentials,
) -> Result<LoginResponse> {
    let response = api.login(credentials).await?;

    match response.token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => session.set(token)?,
        None => tracing::warn!("Login for '{}' returned no token", credentials.username),
    }

    Ok(response)
}

/// Drop the session and return the page to navigate to
pub fn logout(session: &SessionStore) -> Result<Route> {
    session.clear()?;
    Ok(Route::Login)
}
