//! Explicit-submit customer search.

use crate::core::api::{CustomerApi, SEARCH_FAILED};
use crate::core::error::LookupError;
use crate::core::guard::Route;
use crate::core::search::highlight::{highlight, Highlighted};
use crate::core::search::QueryKind;
use crate::core::storage::SessionStore;
use crate::core::types::Customer;
use serde::Serialize;
use std::sync::Arc;

pub const EMPTY_QUERY: &str = "Please enter a search query";
pub const NO_CUSTOMERS: &str = "No customers found with the provided search query";

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Rejected locally; no request was made
    Invalid { message: String },
    /// Session missing or rejected; the session was cleared
    Redirect { to: Route },
    /// Well-formed search, zero matches. Informational, not an error.
    NoResults { message: String },
    Found { count: usize, message: String },
    Failed { message: String },
}

/// Page state of the search screen
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub notice: Option<String>,
    pub customers: Vec<Customer>,
    pub selected: Option<usize>,
    pub loading: bool,
}

/// Highlighted summary line of one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerView {
    pub name: Highlighted,
    pub email: Highlighted,
    /// Only present when the customer has an account number
    pub account_number: Option<Highlighted>,
}

pub struct SearchController {
    api: Arc<dyn CustomerApi>,
    session: Arc<SessionStore>,
    state: SearchState,
}

impl SearchController {
    pub fn new(api: Arc<dyn CustomerApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            state: SearchState::default(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Submit `query`, classified unless `kind` is given
    pub async fn submit(&mut self, query: &str, kind: Option<QueryKind>) -> SearchOutcome {
        self.state.query = query.to_string();
        self.state.error = None;
        self.state.success = None;
        self.state.notice = None;
        self.state.customers.clear();
        self.state.selected = None;

        if query.trim().is_empty() {
            self.state.error = Some(EMPTY_QUERY.to_string());
            return SearchOutcome::Invalid {
                message: EMPTY_QUERY.to_string(),
            };
        }

        let result = if self.session.get().is_none() {
            tracing::debug!("No session token; search not sent");
            Err(LookupError::AuthRequired)
        } else {
            self.state.loading = true;
            let result = self.api.search_customers(query, kind).await;
            self.state.loading = false;
            result
        };

        match result {
            Ok(customers) if customers.is_empty() => {
                self.state.notice = Some(NO_CUSTOMERS.to_string());
                SearchOutcome::NoResults {
                    message: NO_CUSTOMERS.to_string(),
                }
            }
            Ok(customers) => {
                let count = customers.len();
                let message = format!("Found {count} customer(s)");
                self.state.customers = customers;
                self.state.success = Some(message.clone());
                SearchOutcome::Found { count, message }
            }
            Err(LookupError::AuthRequired) => {
                // The guard would bounce /login back to /search while the
                // cookie lives, so the rejected token must go everywhere
                if let Err(e) = self.session.clear() {
                    tracing::warn!("Could not clear rejected session: {}", e);
                }
                SearchOutcome::Redirect { to: Route::Login }
            }
            Err(e) => {
                let message = e.user_message(SEARCH_FAILED);
                self.state.error = Some(message.clone());
                SearchOutcome::Failed { message }
            }
        }
    }

    /// Expand a customer's details, or collapse them if already open
    pub fn toggle_selection(&mut self, index: usize) -> Option<&Customer> {
        if index >= self.state.customers.len() {
            return None;
        }

        if self.state.selected == Some(index) {
            self.state.selected = None;
            None
        } else {
            self.state.selected = Some(index);
            self.state.customers.get(index)
        }
    }

    pub fn selected(&self) -> Option<&Customer> {
        self.state
            .selected
            .and_then(|i| self.state.customers.get(i))
    }

    /// Summary lines for the current results, highlighted against the
    /// submitted query
    pub fn views(&self) -> Vec<CustomerView> {
        self.state
            .customers
            .iter()
            .map(|c| customer_view(c, &self.state.query))
            .collect()
    }
}

pub fn customer_view(customer: &Customer, query: &str) -> CustomerView {
    CustomerView {
        name: highlight(customer.name.as_deref(), query),
        email: highlight(customer.email.as_deref(), query),
        account_number: customer
            .primary_account_number()
            .map(|n| highlight(Some(n), query)),
    }
}
