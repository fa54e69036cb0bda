//! Tests for explicit search submission

use crate::common::{customer, logged_in_session, memory_session, FakeApi, Reply};
use custlookup::core::guard::Route;
use custlookup::core::search::controller::{EMPTY_QUERY, NO_CUSTOMERS};
use custlookup::core::search::{QueryKind, SearchController, SearchOutcome};
use std::sync::Arc;

fn two_customers() -> Reply {
    Reply::Customers(vec![
        customer("Jane Doe", "jane@bank.io", "100200"),
        customer("John Doe", "john@bank.io", "100300"),
    ])
}

#[tokio::test]
async fn test_empty_query_is_rejected_locally() {
    let api = Arc::new(FakeApi::new());
    let mut controller = SearchController::new(api.clone(), memory_session());

    for query in ["", "   ", "\t"] {
        let outcome = controller.submit(query, None).await;
        assert_eq!(
            outcome,
            SearchOutcome::Invalid {
                message: EMPTY_QUERY.to_string()
            }
        );
        assert_eq!(controller.state().error.as_deref(), Some(EMPTY_QUERY));
    }

    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_found_reports_count() {
    let api = Arc::new(FakeApi::new().with("Doe", 0, two_customers()));
    let mut controller = SearchController::new(api.clone(), logged_in_session("tok"));

    let outcome = controller.submit("Doe", None).await;

    assert_eq!(
        outcome,
        SearchOutcome::Found {
            count: 2,
            message: "Found 2 customer(s)".to_string()
        }
    );
    let state = controller.state();
    assert_eq!(state.success.as_deref(), Some("Found 2 customer(s)"));
    assert_eq!(state.error, None);
    assert_eq!(state.customers.len(), 2);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_explicit_kind_is_forwarded() {
    let api = Arc::new(FakeApi::new());
    let mut controller = SearchController::new(api.clone(), logged_in_session("tok"));

    controller.submit("12345", None).await;
    controller.submit("12345", Some(QueryKind::Name)).await;

    assert_eq!(api.kinds(), vec![None, Some(QueryKind::Name)]);
}

#[tokio::test]
async fn test_no_results_is_a_notice_not_an_error() {
    let api = Arc::new(FakeApi::new());
    let mut controller = SearchController::new(api.clone(), logged_in_session("tok"));

    let outcome = controller.submit("nobody", None).await;

    assert_eq!(
        outcome,
        SearchOutcome::NoResults {
            message: NO_CUSTOMERS.to_string()
        }
    );
    assert_eq!(controller.state().notice.as_deref(), Some(NO_CUSTOMERS));
    assert_eq!(controller.state().error, None);
    assert_eq!(controller.state().success, None);
}

#[tokio::test]
async fn test_backend_message_shown_verbatim() {
    let api = Arc::new(FakeApi::new().with(
        "boom",
        0,
        Reply::Backend("Database unavailable".to_string()),
    ));
    let mut controller = SearchController::new(api, logged_in_session("tok"));

    let outcome = controller.submit("boom", None).await;

    assert_eq!(
        outcome,
        SearchOutcome::Failed {
            message: "Database unavailable".to_string()
        }
    );
    assert_eq!(
        controller.state().error.as_deref(),
        Some("Database unavailable")
    );
}

#[tokio::test]
async fn test_backend_without_message_uses_fallback() {
    let api = Arc::new(FakeApi::new().with("boom", 0, Reply::Backend(String::new())));
    let mut controller = SearchController::new(api, logged_in_session("tok"));

    let outcome = controller.submit("boom", None).await;

    assert_eq!(
        outcome,
        SearchOutcome::Failed {
            message: "Failed to fetch customer data".to_string()
        }
    );
}

#[tokio::test]
async fn test_auth_required_clears_session_and_redirects() {
    let session = logged_in_session("stale");

    let api = Arc::new(FakeApi::new().with("Doe", 0, Reply::Unauthorized));
    let mut controller = SearchController::new(api, Arc::clone(&session));

    let outcome = controller.submit("Doe", None).await;

    assert_eq!(outcome, SearchOutcome::Redirect { to: Route::Login });
    let status = session.status().unwrap();
    assert!(!status.cached);
    assert!(!status.durable);
    assert!(!status.cookie);
}

#[tokio::test]
async fn test_missing_token_redirects_without_calling_backend() {
    let api = Arc::new(FakeApi::new().with("Doe", 0, two_customers()));
    let mut controller = SearchController::new(api.clone(), memory_session());

    let outcome = controller.submit("Doe", None).await;

    assert_eq!(outcome, SearchOutcome::Redirect { to: Route::Login });
    assert!(api.calls().is_empty());
    assert!(controller.state().customers.is_empty());
    assert!(!controller.state().loading);
}

#[tokio::test]
async fn test_resubmit_clears_previous_results() {
    let api = Arc::new(FakeApi::new().with("Doe", 0, two_customers()));
    let mut controller = SearchController::new(api, logged_in_session("tok"));

    controller.submit("Doe", None).await;
    controller.toggle_selection(0);
    controller.submit("", None).await;

    let state = controller.state();
    assert!(state.customers.is_empty());
    assert_eq!(state.success, None);
    assert_eq!(state.selected, None);
    assert_eq!(state.query, "");
}

#[tokio::test]
async fn test_toggle_selection() {
    let api = Arc::new(FakeApi::new().with("Doe", 0, two_customers()));
    let mut controller = SearchController::new(api, logged_in_session("tok"));
    controller.submit("Doe", None).await;

    let opened = controller.toggle_selection(1).and_then(|c| c.name.clone());
    assert_eq!(opened.as_deref(), Some("John Doe"));
    assert_eq!(controller.state().selected, Some(1));

    // Same index again collapses
    assert!(controller.toggle_selection(1).is_none());
    assert_eq!(controller.selected(), None);

    // Switching moves the selection
    controller.toggle_selection(0);
    controller.toggle_selection(1);
    assert_eq!(controller.state().selected, Some(1));

    assert!(controller.toggle_selection(9).is_none());
    assert_eq!(controller.state().selected, Some(1));
}

#[tokio::test]
async fn test_views_highlight_submitted_query() {
    let api = Arc::new(FakeApi::new().with("doe", 0, two_customers()));
    let mut controller = SearchController::new(api, logged_in_session("tok"));
    controller.submit("doe", None).await;

    let views = controller.views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].name.marks(), vec!["Doe"]);
    assert!(!views[0].email.has_marks());
    assert_eq!(
        views[0].account_number.as_ref().map(|a| a.to_string()),
        Some("100200".to_string())
    );
}
