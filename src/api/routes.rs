use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::{dto, errors};
use crate::core::{BankAccount, MutationDispatcher};
use crate::types::{MutationKind, MutationRequest};

pub fn router() -> Router {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/:id/deposit", post(deposit))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/accounts/:id/balance", get(get_balance))
}

pub async fn create_account(
    Extension(dispatcher): Extension<MutationDispatcher>,
) -> axum::response::Response {
    let id = dispatcher.store().create_account();
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

pub async fn deposit(
    Extension(dispatcher): Extension<MutationDispatcher>,
    Path(id): Path<String>,
    params: Result<Query<dto::MutationParams>, QueryRejection>,
    body: Bytes,
) -> axum::response::Response {
    mutate(&dispatcher, MutationKind::Deposit, &id, params, &body).await
}

pub async fn withdraw(
    Extension(dispatcher): Extension<MutationDispatcher>,
    Path(id): Path<String>,
    params: Result<Query<dto::MutationParams>, QueryRejection>,
    body: Bytes,
) -> axum::response::Response {
    mutate(&dispatcher, MutationKind::Withdrawal, &id, params, &body).await
}

pub async fn get_balance(
    Extension(dispatcher): Extension<MutationDispatcher>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_account_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let account = match dispatcher.store().get(id) {
        Ok(account) => account,
        Err(e) => return errors::ledger_error_to_response(&e),
    };

    let balance = account.balance();
    tracing::info!(account = id, %balance, "checked balance");

    (
        StatusCode::OK,
        Json(json!({ "balance": dto::decimal_to_json(balance) })),
    )
        .into_response()
}

// The body is decoded before the account is resolved, so a malformed body is
// reported even for unknown accounts. The amount is only converted once the
// account is known to exist.
async fn mutate(
    dispatcher: &MutationDispatcher,
    kind: MutationKind,
    raw_id: &str,
    params: Result<Query<dto::MutationParams>, QueryRejection>,
    body: &[u8],
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_request_body",
                rejection.body_text(),
            )
        }
    };

    let request = match dto::AmountRequest::from_body(body) {
        Ok(request) => request,
        Err(e) => return errors::ledger_error_to_response(&e),
    };

    tracing::info!(account = raw_id, %kind, amount = ?request.amount, "received mutation request");

    let account = match dto::parse_account_id(raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = dispatcher.store().get(account) {
        return errors::ledger_error_to_response(&e);
    }

    let amount = match request.decimal_amount() {
        Ok(amount) => amount,
        Err(e) => return errors::ledger_error_to_response(&e),
    };

    let ticket = match dispatcher.submit(MutationRequest {
        account,
        kind,
        amount,
    }) {
        Ok(ticket) => ticket,
        Err(e) => return errors::ledger_error_to_response(&e),
    };

    if !params.wait {
        return (StatusCode::OK, Json(json!({ "status": "success" }))).into_response();
    }

    match ticket.outcome().await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "balance": dto::decimal_to_json(receipt.balance),
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(&e),
    }
}
