//! Asynchronous deposit/withdrawal dispatch
//!
//! This module provides the `MutationDispatcher`, which decouples "the caller
//! was told the request was accepted" from "the mutation was applied".
//!
//! # Design
//!
//! For every request the dispatcher:
//! 1. Resolves the target account (fails fast with `AccountNotFound`)
//! 2. Validates the amount (fails fast with `InvalidAmount`)
//! 3. Schedules the deposit/withdrawal as an independent tokio task
//! 4. Returns a `MutationTicket` immediately, before the task has run
//!
//! The outcome of step 3 is always logged. Callers that need it can await the
//! ticket; callers that drop it get fire-and-forget semantics.
//!
//! # Ordering
//!
//! ```text
//! OrderingPolicy::Unordered       one task per mutation, racing for the account lock
//! OrderingPolicy::PerAccountFifo  one bounded queue + worker task per account
//! ```
//!
//! With `Unordered` there is no ordering guarantee across concurrently
//! dispatched mutations on one account: A submitted before B may be applied
//! after B. `PerAccountFifo` applies each account's mutations in submission
//! order and rejects submissions with `QueueFull` when a lane is at capacity.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use super::lane::Lane;
use super::traits::BankAccount;
use super::AccountStore;
use crate::types::{
    validate_amount, Account, AccountId, LedgerError, MutationKind, MutationReceipt,
    MutationRequest,
};

/// Default capacity of a per-account mutation lane
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// How dispatched mutations on the same account are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Every mutation is an independent task; no submission order is kept
    #[default]
    Unordered,

    /// Mutations for one account are applied in submission order
    ///
    /// The first submission for an account opens its lane, and the lane's
    /// worker task lives as long as the dispatcher. Idle workers are never
    /// reaped, so the task count grows with the number of accounts that have
    /// received a mutation, never beyond the number of accounts.
    PerAccountFifo,
}

/// Configuration for mutation dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    /// Ordering policy for mutations on the same account
    pub ordering: OrderingPolicy,
    /// Capacity of each per-account lane (FIFO ordering only)
    pub queue_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingPolicy::Unordered,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl DispatcherConfig {
    /// Create a new DispatcherConfig with custom values
    ///
    /// A zero `queue_capacity` falls back to the default.
    pub fn new(ordering: OrderingPolicy, queue_capacity: usize) -> Self {
        let queue_capacity = if queue_capacity == 0 {
            tracing::warn!(
                queue_capacity,
                default = DEFAULT_QUEUE_CAPACITY,
                "invalid queue capacity, using default"
            );
            DEFAULT_QUEUE_CAPACITY
        } else {
            queue_capacity
        };

        Self {
            ordering,
            queue_capacity,
        }
    }
}

/// A validated mutation bound to its account, ready to be applied
#[derive(Debug)]
pub(crate) struct Job {
    pub(crate) account: Arc<Account>,
    pub(crate) kind: MutationKind,
    pub(crate) amount: Decimal,
    pub(crate) reply: oneshot::Sender<Result<MutationReceipt, LedgerError>>,
}

impl Job {
    /// Apply the mutation, log the outcome and report it to the ticket
    pub(crate) fn run(self) {
        let id = self.account.id();
        let applied = match self.kind {
            MutationKind::Deposit => self.account.deposit(self.amount),
            MutationKind::Withdrawal => self.account.withdraw(self.amount),
        };

        let result = applied.map(|balance| MutationReceipt {
            account: id,
            kind: self.kind,
            amount: self.amount,
            balance,
        });

        match &result {
            Ok(receipt) => tracing::info!(
                account = id,
                kind = %self.kind,
                amount = %self.amount,
                balance = %receipt.balance,
                "applied mutation"
            ),
            Err(error) => tracing::warn!(
                account = id,
                kind = %self.kind,
                amount = %self.amount,
                %error,
                "mutation failed"
            ),
        }

        // Nobody may be waiting; the log line above is the record.
        let _ = self.reply.send(result);
    }
}

/// Handle to an accepted, possibly not yet applied, mutation
///
/// Dropping the ticket does not cancel the mutation.
#[derive(Debug)]
pub struct MutationTicket {
    account: AccountId,
    kind: MutationKind,
    outcome: oneshot::Receiver<Result<MutationReceipt, LedgerError>>,
}

impl MutationTicket {
    /// Deposit or withdrawal
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Wait for the mutation to be applied
    ///
    /// # Returns
    ///
    /// * `Ok(MutationReceipt)` - The mutation was applied
    /// * `Err(LedgerError::InsufficientFunds)` - A withdrawal exceeded the balance
    /// * `Err(LedgerError::ArithmeticOverflow)` - A deposit overflowed the balance
    /// * `Err(LedgerError::MutationAbandoned)` - The task was torn down before reporting
    pub async fn outcome(self) -> Result<MutationReceipt, LedgerError> {
        let account = self.account;
        match self.outcome.await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::mutation_abandoned(account)),
        }
    }
}

/// Accepts deposits and withdrawals and applies them asynchronously
///
/// Cloning is cheap; clones share the store and the per-account lanes.
///
/// All submitting methods spawn tokio tasks and must be called from within a
/// tokio runtime.
#[derive(Debug, Clone)]
pub struct MutationDispatcher {
    store: Arc<AccountStore>,
    config: DispatcherConfig,
    /// Serial lanes, created lazily on first FIFO submission for an account
    lanes: Arc<DashMap<AccountId, Lane>>,
}

impl MutationDispatcher {
    /// Create a new MutationDispatcher over `store`
    pub fn new(store: Arc<AccountStore>, config: DispatcherConfig) -> Self {
        Self {
            store,
            config,
            lanes: Arc::new(DashMap::new()),
        }
    }

    /// The store mutations are applied against
    pub fn store(&self) -> &Arc<AccountStore> {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Accept a deposit of `amount` into `account`
    pub fn deposit(
        &self,
        account: AccountId,
        amount: Decimal,
    ) -> Result<MutationTicket, LedgerError> {
        self.submit(MutationRequest::deposit(account, amount))
    }

    /// Accept a withdrawal of `amount` from `account`
    pub fn withdraw(
        &self,
        account: AccountId,
        amount: Decimal,
    ) -> Result<MutationTicket, LedgerError> {
        self.submit(MutationRequest::withdrawal(account, amount))
    }

    /// Accept a mutation request
    ///
    /// # Returns
    ///
    /// * `Ok(MutationTicket)` - The mutation was scheduled; it may not have run yet
    /// * `Err(LedgerError::AccountNotFound)` - The account does not exist
    /// * `Err(LedgerError::InvalidAmount)` - The amount is missing, zero or negative
    /// * `Err(LedgerError::QueueFull)` - The account's FIFO lane is at capacity
    pub fn submit(&self, request: MutationRequest) -> Result<MutationTicket, LedgerError> {
        let account = self.store.get(request.account)?;
        let amount = request
            .amount
            .ok_or_else(|| LedgerError::invalid_amount("missing"))
            .and_then(validate_amount)?;

        let (reply, outcome) = oneshot::channel();
        let job = Job {
            account,
            kind: request.kind,
            amount,
            reply,
        };

        match self.config.ordering {
            OrderingPolicy::Unordered => {
                tokio::spawn(async move { job.run() });
            }
            OrderingPolicy::PerAccountFifo => self.lane(request.account).push(job)?,
        }

        tracing::info!(
            account = request.account,
            kind = %request.kind,
            %amount,
            "accepted mutation"
        );

        Ok(MutationTicket {
            account: request.account,
            kind: request.kind,
            outcome,
        })
    }

    fn lane(&self, account: AccountId) -> Lane {
        let capacity = self.config.queue_capacity;
        self.lanes
            .entry(account)
            .or_insert_with(|| Lane::spawn(account, capacity))
            .value()
            .clone()
    }
}
