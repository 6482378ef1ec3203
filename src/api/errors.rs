use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::types::LedgerError;

pub fn ledger_error_to_response(err: &LedgerError) -> Response {
    let (status, code) = match err {
        LedgerError::AccountNotFound { .. } => (StatusCode::NOT_FOUND, "account_not_found"),
        LedgerError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "invalid_amount"),
        LedgerError::MalformedRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request_body"),
        LedgerError::InsufficientFunds { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_funds")
        }
        LedgerError::ArithmeticOverflow { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "arithmetic_overflow")
        }
        LedgerError::QueueFull { .. } => (StatusCode::SERVICE_UNAVAILABLE, "queue_full"),
        LedgerError::MutationAbandoned { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "mutation_abandoned")
        }
    };

    if err.is_client_error() {
        tracing::debug!(error = %err, code, "rejected request");
    } else {
        tracing::warn!(error = %err, code, "request failed");
    }
    json_error(status, code, err.to_string())
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
