//! Benchmark suite for ledger contention
//!
//! Compares single-account contention against load spread over many accounts,
//! for both dispatch ordering policies and for direct account access.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use account_ledger::{
    Account, AccountStore, BankAccount, DispatcherConfig, MutationDispatcher, MutationTicket,
    OrderingPolicy,
};
use futures::future::join_all;
use rust_decimal::Decimal;
use std::sync::Arc;

const MUTATIONS: usize = 10_000;

fn main() {
    divan::main();
}

/// Dispatch MUTATIONS deposits round-robin over `accounts` accounts and await them all
fn dispatch_deposits(ordering: OrderingPolicy, accounts: usize) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .build()
        .expect("Failed to create runtime");

    runtime.block_on(async {
        let store = Arc::new(AccountStore::new());
        let dispatcher = MutationDispatcher::new(
            Arc::clone(&store),
            DispatcherConfig::new(ordering, MUTATIONS),
        );
        let ids: Vec<_> = (0..accounts).map(|_| store.create_account()).collect();

        let tickets: Vec<MutationTicket> = (0..MUTATIONS)
            .map(|i| {
                dispatcher
                    .deposit(ids[i % ids.len()], Decimal::ONE)
                    .expect("Deposit rejected")
            })
            .collect();

        for result in join_all(tickets.into_iter().map(MutationTicket::outcome)).await {
            result.expect("Deposit failed");
        }
    });
}

/// Unordered dispatch: one task per mutation
#[divan::bench(args = [1, 64])]
fn unordered_dispatch(accounts: usize) {
    dispatch_deposits(OrderingPolicy::Unordered, accounts);
}

/// FIFO dispatch: one serial lane per account
#[divan::bench(args = [1, 64])]
fn per_account_fifo_dispatch(accounts: usize) {
    dispatch_deposits(OrderingPolicy::PerAccountFifo, accounts);
}

/// Direct deposits on one shared account from several threads
#[divan::bench(threads = [1, 4, 8])]
fn contended_account_deposit(bencher: divan::Bencher) {
    let account = Account::new(1);

    bencher.bench(|| account.deposit(Decimal::ONE).expect("Deposit failed"));
}
