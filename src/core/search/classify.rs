//! Identifier classification for lookups.
//!
//! Maps raw query text to the backend query parameter it should be
//! sent as. Pure and total: every input has exactly one kind.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ASCII digits only; `\d` would admit other Unicode numerals
static ACCOUNT_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Identifier type of a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Email,
    AccountNumber,
    Name,
}

impl QueryKind {
    /// Query parameter name understood by `GET /customers`
    pub fn param(&self) -> &'static str {
        match self {
            QueryKind::Email => "email",
            QueryKind::AccountNumber => "account_number",
            QueryKind::Name => "name",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "email" => Ok(QueryKind::Email),
            "account_number" | "account" => Ok(QueryKind::AccountNumber),
            "name" => Ok(QueryKind::Name),
            other => Err(format!(
                "Unknown identifier type '{other}' (expected email, account_number or name)"
            )),
        }
    }
}

/// Infer the identifier type of `text`
///
/// ```
/// use custlookup::core::search::{classify, QueryKind};
///
/// assert_eq!(classify("a@b.com"), QueryKind::Email);
/// assert_eq!(classify("123456"), QueryKind::AccountNumber);
/// assert_eq!(classify("Jane Doe"), QueryKind::Name);
/// ```
pub fn classify(text: &str) -> QueryKind {
    if text.contains('@') {
        QueryKind::Email
    } else if ACCOUNT_NUMBER_PATTERN.is_match(text) {
        QueryKind::AccountNumber
    } else {
        QueryKind::Name
    }
}

/// Explicit kind when supplied, otherwise inferred
pub fn resolve_kind(text: &str, explicit: Option<QueryKind>) -> QueryKind {
    explicit.unwrap_or_else(|| classify(text))
}
