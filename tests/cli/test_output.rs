//! Tests for CLI output formatting helpers
//!
//! - Amount formatting (two decimals, 0.00 default)
//! - Customer detail blocks
//! - Highlight rendering
//! - Cookie expiry descriptions

use chrono::{Duration, Utc};
use custlookup::cli::output::{
    customer_details, format_amount, format_expiry, render_highlighted, NO_POCKETS,
    NO_TERM_DEPOSITS,
};
use custlookup::core::search::highlight;
use custlookup::core::types::{Customer, TermDeposit};

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(Some(0.0)), "0.00");
    assert_eq!(format_amount(Some(12.3)), "12.30");
    assert_eq!(format_amount(Some(-4.5)), "-4.50");
    assert_eq!(format_amount(None), "0.00");
}

#[test]
fn test_details_missing_duration_and_amount() {
    let customer = Customer {
        term_deposits: vec![TermDeposit {
            amount: None,
            duration: None,
        }],
        ..Default::default()
    };

    let lines = customer_details(&customer);
    assert!(lines.contains(&"  Amount: $0.00, Duration:  months".to_string()));
    assert!(lines.contains(&format!("  {NO_POCKETS}")));
    assert!(!lines.contains(&format!("  {NO_TERM_DEPOSITS}")));
}

#[test]
fn test_render_highlighted_plain_when_uncolored() {
    colored::control::set_override(false);

    let text = highlight(Some("Jane Doe"), "doe");
    assert_eq!(render_highlighted(&text), "Jane Doe");

    colored::control::unset_override();
}

#[test]
fn test_format_expiry() {
    let now = Utc::now();
    assert_eq!(format_expiry(&(now - Duration::seconds(1))), "expired");
    assert_eq!(format_expiry(&(now + Duration::hours(2) + Duration::minutes(5))), "in 2h");
    assert_eq!(format_expiry(&(now + Duration::days(1) + Duration::hours(1))), "in 1d");
    assert_eq!(format_expiry(&(now + Duration::minutes(10) + Duration::seconds(30))), "in 10m");
}
