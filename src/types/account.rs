//! Account-related types for the ledger
//!
//! This module defines the Account structure: a single balance cell guarded
//! by its own mutex. Every read and write of the balance happens while that
//! lock is held, so concurrent mutators never lose updates and readers never
//! observe a torn value.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::mutation::validate_amount;
use crate::core::traits::BankAccount;

/// Account identifier
///
/// Issued by the store starting at 1, never reused.
pub type AccountId = u64;

/// A single balance cell with its own lock
///
/// Accounts are shared between request handlers and dispatched mutation
/// tasks through `Arc<Account>`. Operations on different accounts never
/// contend with each other.
#[derive(Debug)]
pub struct Account {
    /// The account id, fixed at creation
    id: AccountId,

    /// Current balance, never negative
    balance: Mutex<Decimal>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: AccountId) -> Self {
        Account {
            id,
            balance: Mutex::new(Decimal::ZERO),
        }
    }

    /// The id this account was created with
    pub fn id(&self) -> AccountId {
        self.id
    }

    // Critical sections only do checked arithmetic and cannot panic, so a
    // poisoned lock still guards a valid balance.
    fn lock_balance(&self) -> MutexGuard<'_, Decimal> {
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BankAccount for Account {
    fn deposit(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let amount = validate_amount(amount)?;

        let mut balance = self.lock_balance();
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", self.id))?;
        Ok(*balance)
    }

    fn withdraw(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let amount = validate_amount(amount)?;

        // Check and debit under the same guard.
        let mut balance = self.lock_balance();
        if *balance < amount {
            return Err(LedgerError::insufficient_funds(self.id, *balance, amount));
        }
        *balance -= amount;
        Ok(*balance)
    }

    fn balance(&self) -> Decimal {
        *self.lock_balance()
    }
}
