//! Thread-safe account storage
//!
//! This module provides the `AccountStore` struct, which owns every account in
//! the ledger and the lifecycle of account ids.
//!
//! # Design
//!
//! The store pairs a `DashMap` (a concurrent HashMap) with an atomic id counter.
//! Creating an account allocates the id with a single `fetch_add` and inserts
//! the account before the id is returned, so:
//! - Concurrent creates never collide on an id and never skip one
//! - No caller can hold an id whose account is missing from the map
//! - Lookups never observe a partially-constructed map (DashMap shard locks)
//!
//! # Thread Safety
//!
//! The map only guards the id -> `Arc<Account>` association. Balances are
//! protected by each account's own lock, so mutating an account never takes a
//! store-wide lock and different accounts proceed in parallel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::types::{Account, AccountId, LedgerError};

/// The in-memory ledger of accounts
///
/// One instance lives for the whole process. Accounts are never removed.
#[derive(Debug)]
pub struct AccountStore {
    /// Next id to hand out, starting at 1
    next_id: AtomicU64,

    /// Concurrent HashMap storing accounts by id
    ///
    /// Values are shared handles so dispatched mutations can outlive the
    /// request that looked them up.
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl AccountStore {
    /// Create a new empty AccountStore
    ///
    /// The first account created will receive id 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            accounts: DashMap::new(),
        }
    }

    /// Create a new account with a zero balance
    ///
    /// # Returns
    ///
    /// The id of the new account. The account is already visible to `get`
    /// by the time the id is returned.
    pub fn create_account(&self) -> AccountId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.accounts.insert(id, Arc::new(Account::new(id)));
        tracing::info!(account = id, "created account");
        id
    }

    /// Look up an account by id
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Account>)` - A shared handle to the account
    /// * `Err(LedgerError::AccountNotFound)` - If this store never issued `id`
    pub fn get(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Number of accounts in the ledger
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account has been created yet
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::BankAccount;
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_first_account_gets_id_one() {
        let store = AccountStore::new();

        let id = store.create_account();

        assert_eq!(id, 1);
        assert_eq!(store.get(id).unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = AccountStore::new();

        let ids: Vec<AccountId> = (0..5).map(|_| store.create_account()).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_get_unknown_account_fails() {
        let store = AccountStore::new();

        let result = store.get(999);

        assert_eq!(result.unwrap_err(), LedgerError::account_not_found(999));
    }

    #[test]
    fn test_get_does_not_create_account() {
        let store = AccountStore::new();

        let _ = store.get(1);

        assert!(store.is_empty());
        assert_eq!(store.create_account(), 1);
    }

    #[test]
    fn test_id_from_other_store_is_not_found() {
        let first = AccountStore::new();
        let second = AccountStore::new();
        for _ in 0..3 {
            first.create_account();
        }

        let foreign_id = first.create_account();

        assert!(first.get(foreign_id).is_ok());
        assert_eq!(
            second.get(foreign_id).unwrap_err(),
            LedgerError::account_not_found(foreign_id)
        );
    }

    #[test]
    fn test_get_returns_shared_handle() {
        let store = AccountStore::new();
        let id = store.create_account();

        let first = store.get(id).unwrap();
        first.deposit(Decimal::new(25, 0)).unwrap();
        let second = store.get(id).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.balance(), Decimal::new(25, 0));
    }

    // Concurrent access tests
    #[test]
    fn test_concurrent_creates_yield_unique_contiguous_ids() {
        let store = Arc::new(AccountStore::new());
        let mut handles = vec![];

        // 16 threads each create 50 accounts
        for _ in 0..16 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                (0..50)
                    .map(|_| store_clone.create_account())
                    .collect::<Vec<_>>()
            });
            handles.push(handle);
        }

        let ids: Vec<AccountId> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        let unique: HashSet<AccountId> = ids.iter().copied().collect();

        assert_eq!(ids.len(), 800);
        assert_eq!(unique.len(), 800);
        assert_eq!(unique, (1..=800).collect::<HashSet<_>>());
        assert_eq!(store.len(), 800);
    }

    #[test]
    fn test_concurrent_create_and_lookup() {
        let store = Arc::new(AccountStore::new());
        let mut handles = vec![];

        // Every created id must be immediately resolvable by its creator
        for _ in 0..10 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                for _ in 0..100 {
                    let id = store_clone.create_account();
                    let account = store_clone.get(id).unwrap();
                    assert_eq!(account.id(), id);
                }
            });
            handles.push(handle);
        }

        // Readers probing ids that may or may not exist yet
        for _ in 0..4 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                for id in 1..=1000 {
                    if let Ok(account) = store_clone.get(id) {
                        assert_eq!(account.id(), id);
                    }
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn test_concurrent_updates_different_accounts() {
        let store = Arc::new(AccountStore::new());
        let ids: Vec<AccountId> = (0..10).map(|_| store.create_account()).collect();
        let mut handles = vec![];

        // Each thread hammers its own account
        for id in ids.clone() {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                let account = store_clone.get(id).unwrap();
                for _ in 0..100 {
                    account.deposit(Decimal::new(id as i64, 0)).unwrap();
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for id in ids {
            let expected = Decimal::new(id as i64 * 100, 0);
            assert_eq!(store.get(id).unwrap().balance(), expected);
        }
    }
}
