//! Core ledger module
//!
//! This module contains the concurrent ledger components:
//! - `traits` - The `BankAccount` seam implemented by balance cells
//! - `account_store` - Id allocation and account lookup
//! - `dispatcher` - Asynchronous deposit/withdrawal dispatch
//! - `lane` - Per-account serial queues used for FIFO dispatch

pub mod account_store;
pub mod dispatcher;
mod lane;
pub mod traits;

pub use account_store::AccountStore;
pub use dispatcher::{
    DispatcherConfig, MutationDispatcher, MutationTicket, OrderingPolicy, DEFAULT_QUEUE_CAPACITY,
};
pub use traits::BankAccount;
