//! Per-account serial mutation lanes
//!
//! A lane is a bounded queue drained by a single worker task, so the
//! mutations pushed into it are applied one at a time in push order. The
//! dispatcher keeps one lane per account when FIFO ordering is enabled; lanes
//! for different accounts drain concurrently.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::dispatcher::Job;
use crate::types::{AccountId, LedgerError};

#[derive(Debug, Clone)]
pub(crate) struct Lane {
    account: AccountId,
    capacity: usize,
    sender: mpsc::Sender<Job>,
}

impl Lane {
    /// Open a lane for `account` and spawn its worker
    ///
    /// The worker exits once every sender (every dispatcher clone) is gone.
    pub(crate) fn spawn(account: AccountId, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Job>(capacity);

        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                job.run();
            }
            tracing::debug!(account, "mutation lane closed");
        });

        tracing::debug!(account, capacity, "opened mutation lane");
        Self {
            account,
            capacity,
            sender,
        }
    }

    /// Enqueue a job without waiting
    ///
    /// A full lane rejects the job rather than blocking the submitter.
    pub(crate) fn push(&self, job: Job) -> Result<(), LedgerError> {
        self.sender.try_send(job).map_err(|error| match error {
            TrySendError::Full(_) => {
                tracing::warn!(
                    account = self.account,
                    capacity = self.capacity,
                    "mutation lane full"
                );
                LedgerError::queue_full(self.account, self.capacity)
            }
            TrySendError::Closed(_) => LedgerError::mutation_abandoned(self.account),
        })
    }
}
