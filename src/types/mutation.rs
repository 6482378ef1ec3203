//! Mutation-related types for the ledger
//!
//! This module defines the deposit/withdrawal request that the dispatcher
//! accepts, the receipt produced once a mutation has been applied, and the
//! amount validation shared by the account and the dispatcher.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::account::AccountId;
use super::error::LedgerError;

/// Balance mutations supported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Requires a balance at least as large as the amount.
    Withdrawal,
}

impl MutationKind {
    /// Lowercase name used in logs and error contexts
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Deposit => "deposit",
            MutationKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deposit or withdrawal submitted to the dispatcher
///
/// Exists only while in flight; the ledger keeps no record of it.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    /// Target account
    pub account: AccountId,

    /// Deposit or withdrawal
    pub kind: MutationKind,

    /// Requested amount
    ///
    /// `None` when the caller omitted it; rejected as an invalid amount.
    pub amount: Option<Decimal>,
}

impl MutationRequest {
    /// Build a deposit request
    pub fn deposit(account: AccountId, amount: Decimal) -> Self {
        MutationRequest {
            account,
            kind: MutationKind::Deposit,
            amount: Some(amount),
        }
    }

    /// Build a withdrawal request
    pub fn withdrawal(account: AccountId, amount: Decimal) -> Self {
        MutationRequest {
            account,
            kind: MutationKind::Withdrawal,
            amount: Some(amount),
        }
    }
}

/// Outcome of a successfully applied mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReceipt {
    pub account: AccountId,
    pub kind: MutationKind,
    pub amount: Decimal,
    /// Balance immediately after this mutation, read under the same lock
    pub balance: Decimal,
}

/// Validate a mutation amount
///
/// # Returns
///
/// * `Ok(amount)` - If the amount is strictly positive
/// * `Err(LedgerError::InvalidAmount)` - If the amount is zero or negative
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(amount)
}

/// Convert a floating point amount received from a client into a decimal
///
/// Rejects NaN, infinities and magnitudes a decimal cannot hold. The sign is
/// left to `validate_amount`, which runs after the account lookup. Rejected
/// values are rendered in scientific notation to keep error messages short.
pub fn amount_from_f64(amount: f64) -> Result<Decimal, LedgerError> {
    if !amount.is_finite() {
        return Err(LedgerError::invalid_amount(format!("{amount:e}")));
    }
    Decimal::from_f64(amount).ok_or_else(|| LedgerError::invalid_amount(format!("{amount:e}")))
}
