//! Core traits for balance cells
//!
//! This module defines the behavioural seam between the dispatcher and the
//! thing it mutates, so the dispatch and store logic does not depend on how a
//! balance is synchronized.

use rust_decimal::Decimal;

use crate::types::LedgerError;

/// Trait for a lock-guarded balance cell
///
/// All three operations must serialize on the same per-account lock, so any
/// interleaving of calls is equivalent to some sequential order of them.
pub trait BankAccount: Send + Sync {
    /// Credit `amount`, returning the balance after the credit
    ///
    /// Fails with `InvalidAmount` for zero or negative amounts and with
    /// `ArithmeticOverflow` if the balance cannot represent the result.
    fn deposit(&self, amount: Decimal) -> Result<Decimal, LedgerError>;

    /// Debit `amount`, returning the balance after the debit
    ///
    /// Fails with `InsufficientFunds` and leaves the balance unchanged when the
    /// balance is smaller than `amount`. The check and the debit happen under a
    /// single lock acquisition.
    fn withdraw(&self, amount: Decimal) -> Result<Decimal, LedgerError>;

    /// Consistent snapshot of the current balance
    fn balance(&self) -> Decimal;
}
