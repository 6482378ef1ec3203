//! HTTP surface of the ledger
//!
//! A thin axum adapter over the core: it decodes requests, maps them onto
//! `AccountStore` and `MutationDispatcher` calls, and renders `LedgerError`s
//! as JSON error bodies.
//!
//! ```text
//! POST /accounts                      -> 201 {"id": 1}
//! POST /accounts/{id}/deposit         -> 200 {"status": "success"}
//! POST /accounts/{id}/withdraw        -> 200 {"status": "success"}
//! GET  /accounts/{id}/balance         -> 200 {"balance": 100.0}
//! ```
//!
//! Deposits and withdrawals are acknowledged once accepted. Adding
//! `?wait=true` holds the response until the mutation has been applied and
//! reports its outcome, including insufficient funds.

pub mod dto;
pub mod errors;
pub mod routes;

use axum::{extract::Extension, Router};

use crate::core::MutationDispatcher;

/// Build the application router around a dispatcher
pub fn build_app(dispatcher: MutationDispatcher) -> Router {
    routes::router().layer(Extension(dispatcher))
}
