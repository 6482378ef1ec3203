use axum::http::StatusCode;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::api::errors;
use crate::types::{amount_from_f64, AccountId, LedgerError};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Option<f64>,
}

impl AmountRequest {
    /// Decode a request body; any parse failure is a malformed request
    pub fn from_body(body: &[u8]) -> Result<Self, LedgerError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The amount as a decimal, `None` if the client omitted it
    pub fn decimal_amount(&self) -> Result<Option<Decimal>, LedgerError> {
        self.amount.map(amount_from_f64).transpose()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MutationParams {
    /// Wait for the mutation to be applied before responding
    #[serde(default)]
    pub wait: bool,
}

// -------------------------
// Helpers
// -------------------------

/// Parse an account id path segment
///
/// Anything that is not an id this ledger could have issued is reported as an
/// unknown account.
pub fn parse_account_id(raw: &str) -> Result<AccountId, axum::response::Response> {
    raw.parse::<AccountId>().map_err(|_| {
        errors::json_error(
            StatusCode::NOT_FOUND,
            "account_not_found",
            format!("Account {raw} not found"),
        )
    })
}

/// Render a balance as a JSON number
pub fn decimal_to_json(value: Decimal) -> Value {
    value
        .to_f64()
        .map(Value::from)
        .unwrap_or_else(|| Value::String(value.to_string()))
}
