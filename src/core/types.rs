//! Core data types for the customer lookup client.
//!
//! Customers are read-only projections owned by the backend. The
//! client never mutates them, it only displays filtered and
//! highlighted views.

use serde::{Deserialize, Deserializer, Serialize};

/// Customer record as returned by `GET /customers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,

    /// Ordered; the first account is the one shown in listings
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bank_accounts: Vec<BankAccount>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub pockets: Vec<Pocket>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub term_deposits: Vec<TermDeposit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(default, deserialize_with = "opt_string")]
    pub account_number: Option<String>,

    #[serde(default, deserialize_with = "opt_f64")]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "opt_f64")]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermDeposit {
    #[serde(default, deserialize_with = "opt_f64")]
    pub amount: Option<f64>,

    /// Duration in months
    #[serde(default, deserialize_with = "opt_u32")]
    pub duration: Option<u32>,
}

impl Customer {
    /// Account number of the first bank account, if any
    pub fn primary_account_number(&self) -> Option<&str> {
        self.bank_accounts
            .first()
            .and_then(|a| a.account_number.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Balance of the first bank account, if any
    pub fn primary_balance(&self) -> Option<f64> {
        self.bank_accounts.first().and_then(|a| a.balance)
    }
}

/// Lightweight projection of a customer shown in the live dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub name: Option<String>,
    pub email: Option<String>,
    pub account_number: Option<String>,
}

impl From<&Customer> for SuggestionItem {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            account_number: customer.primary_account_number().map(str::to_string),
        }
    }
}

impl SuggestionItem {
    /// Value written into the query field when this item is picked.
    ///
    /// Priority: name, then email, then first account number. Empty
    /// strings are skipped.
    pub fn fill_value(&self) -> Option<String> {
        [&self.name, &self.email, &self.account_number]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
    }

    /// Dropdown line: `name - email - account`
    pub fn label(&self) -> String {
        format!(
            "{} - {} - {}",
            self.name.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or(""),
            self.account_number.as_deref().unwrap_or("")
        )
    }
}

/// Body of `POST /login` and `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form, including the confirmation field that never
/// leaves the client
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Success body of `POST /login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Accepts strings and numbers; `null` and absent become `None`.
fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers and numeric strings; anything else is treated as absent
fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_number))
}

/// Whole, non-negative numbers such as `12`, `12.0` or `"12"`
fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_number)
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
        .map(|n| n as u32))
}

fn as_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
