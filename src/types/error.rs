//! Error types for the account ledger
//!
//! This module defines all error types that can occur while creating accounts,
//! accepting mutations, and applying them.
//!
//! # Error Categories
//!
//! - **Client Input Errors**: Unknown account, invalid amount, malformed request
//! - **Business Rule Rejections**: Insufficient funds
//! - **Arithmetic Errors**: Overflow in balance calculations
//! - **Dispatch Errors**: Full mutation lanes, abandoned mutations

use rust_decimal::Decimal;
use thiserror::Error;

use super::account::AccountId;

/// Main error type for the ledger
///
/// Each variant carries enough context to produce a useful log line or
/// API response without consulting the ledger again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The account id was never issued by this store
    ///
    /// Always a client input error. Lookups never create accounts as a side effect.
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The id that was looked up
        account: AccountId,
    },

    /// Amount is missing, zero, negative, or not a finite number
    ///
    /// Detected synchronously, before any mutation is scheduled.
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// Textual rendering of the rejected amount
        amount: String,
    },

    /// Withdrawal exceeds the current balance
    ///
    /// The balance is left unchanged.
    #[error("Insufficient funds in account {account}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account id
        account: AccountId,
        /// Balance at the moment of the check
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Request payload could not be parsed
    ///
    /// Raised by the transport layer, never by the ledger core.
    #[error("Invalid request body: {message}")]
    MalformedRequest {
        /// Parser diagnostics
        message: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The mutation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account: AccountId,
    },

    /// The account's serial mutation lane is at capacity
    ///
    /// Only raised when per-account FIFO ordering is enabled.
    #[error("Mutation queue for account {account} is full (capacity {capacity})")]
    QueueFull {
        /// Account id
        account: AccountId,
        /// Configured lane capacity
        capacity: usize,
    },

    /// The scheduled mutation was torn down before reporting an outcome
    #[error("Mutation for account {account} was abandoned before completion")]
    MutationAbandoned {
        /// Account id
        account: AccountId,
    },
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::MalformedRequest {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            available,
            requested,
        }
    }

    /// Create a MalformedRequest error
    pub fn malformed_request(message: impl Into<String>) -> Self {
        LedgerError::MalformedRequest {
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a QueueFull error
    pub fn queue_full(account: AccountId, capacity: usize) -> Self {
        LedgerError::QueueFull { account, capacity }
    }

    /// Create a MutationAbandoned error
    pub fn mutation_abandoned(account: AccountId) -> Self {
        LedgerError::MutationAbandoned { account }
    }

    /// Whether the error was caused by the caller's input rather than the ledger
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LedgerError::AccountNotFound { .. }
                | LedgerError::InvalidAmount { .. }
                | LedgerError::MalformedRequest { .. }
        )
    }
}
