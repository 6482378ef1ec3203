//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The lock-guarded balance cell and its identifier
//! - `mutation`: Deposit/withdrawal requests, receipts and amount validation
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod mutation;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use mutation::{
    amount_from_f64, validate_amount, MutationKind, MutationReceipt, MutationRequest,
};
