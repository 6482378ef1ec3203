//! Account Ledger Library
//! # Overview
//!
//! This library provides an in-memory ledger of monetary accounts with
//! per-account locking and asynchronous deposit/withdrawal dispatch, plus a
//! thin HTTP surface over it.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, mutation requests, errors)
//! - [`core`] - Ledger components:
//!   - [`core::account_store`] - Id allocation and account lookup
//!   - [`core::dispatcher`] - Fire-and-forget mutation dispatch with optional completion tickets
//!   - [`core::traits`] - The `BankAccount` seam implemented by balance cells
//! - [`api`] - HTTP routes, DTOs and error responses
//! - [`cli`] - Server configuration parsing
//! - [`observability`] - Tracing subscriber setup
//!
//! # Operations
//!
//! - **CreateAccount**: Allocate the next id and insert a zero-balance account
//! - **Deposit**: Accepted synchronously, applied asynchronously
//! - **Withdraw**: Accepted synchronously, applied asynchronously; rejected if it would overdraw
//! - **GetBalance**: Consistent snapshot read under the account lock
//!
//! # Consistency
//!
//! Operations on one account are linearizable through its lock. Operations on
//! different accounts never contend. Dispatched mutations on the same account
//! carry no ordering guarantee unless per-account FIFO dispatch is enabled.
//! Nothing is persisted.

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod observability;
pub mod types;

pub use self::core::{
    AccountStore, BankAccount, DispatcherConfig, MutationDispatcher, MutationTicket,
    OrderingPolicy,
};
pub use types::{
    Account, AccountId, LedgerError, MutationKind, MutationReceipt, MutationRequest,
};
