//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::cli::OutputFormat;
use crate::core::search::Highlighted;
use crate::core::types::{Customer, SuggestionItem};

pub const NO_POCKETS: &str = "No pockets available";
pub const NO_TERM_DEPOSITS: &str = "No term deposits available";

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for routes
    pub fn route(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for numbers/amounts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for query matches
    pub fn mark(s: &str) -> ColoredString {
        s.black().on_yellow()
    }

    /// Style for list indices
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

/// Two-decimal amount; absent amounts render as `0.00`
pub fn format_amount(amount: Option<f64>) -> String {
    format!("{:.2}", amount.unwrap_or(0.0))
}

/// Render highlighted text with matches emphasized
pub fn render_highlighted(text: &Highlighted) -> String {
    text.render_with(|s| colors::mark(s).to_string())
}

/// Indented detail lines for an expanded customer
pub fn customer_details(customer: &Customer) -> Vec<String> {
    let mut lines = vec![format!(
        "Balance: ${}",
        format_amount(customer.primary_balance())
    )];

    lines.push("Pockets:".to_string());
    if customer.pockets.is_empty() {
        lines.push(format!("  {NO_POCKETS}"));
    } else {
        for pocket in &customer.pockets {
            lines.push(format!(
                "  {}: ${}",
                pocket.name.as_deref().unwrap_or(""),
                format_amount(pocket.balance)
            ));
        }
    }

    lines.push("Term Deposits:".to_string());
    if customer.term_deposits.is_empty() {
        lines.push(format!("  {NO_TERM_DEPOSITS}"));
    } else {
        for deposit in &customer.term_deposits {
            let duration = deposit
                .duration
                .map(|d| d.to_string())
                .unwrap_or_default();
            lines.push(format!(
                "  Amount: ${}, Duration: {} months",
                format_amount(deposit.amount),
                duration
            ));
        }
    }

    lines
}

/// One numbered dropdown line
pub fn format_suggestion(index: usize, item: &SuggestionItem) -> String {
    format!("{} {}", colors::rank(&format!("[{index}]")), item.label())
}

/// Describe a cookie expiry relative to now ("in 3h", "expired")
pub fn format_expiry(expires_at: &chrono::DateTime<chrono::Utc>) -> String {
    let remaining = expires_at.signed_duration_since(chrono::Utc::now());

    if remaining.num_seconds() <= 0 {
        return "expired".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours();
    let mins = remaining.num_minutes();

    if days > 0 {
        format!("in {days}d")
    } else if hours > 0 {
        format!("in {hours}h")
    } else if mins > 0 {
        format!("in {mins}m")
    } else {
        "in under a minute".to_string()
    }
}

/// Print output based on format
pub fn print_output<T: serde::Serialize>(data: &T, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Human => serde_json::to_string_pretty(data),
        // One document per line so streams stay parseable
        OutputFormat::Json => serde_json::to_string(data),
    };
    if let Ok(json) = rendered {
        println!("{json}");
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print an informational notice
pub fn print_notice(message: &str) {
    println!("{}", colors::dim(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
