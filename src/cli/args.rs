use crate::core::{DispatcherConfig, OrderingPolicy, DEFAULT_QUEUE_CAPACITY};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Serve an in-memory account ledger over HTTP
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Serve an in-memory account ledger over HTTP", long_about = None)]
pub struct ServerArgs {
    /// Address the HTTP server listens on
    #[arg(
        long = "bind",
        env = "LEDGER_BIND",
        value_name = "ADDR",
        default_value = "0.0.0.0:8080",
        help = "Socket address to listen on"
    )]
    pub bind: SocketAddr,

    /// Ordering of dispatched mutations on the same account
    #[arg(
        long = "ordering",
        env = "LEDGER_ORDERING",
        value_name = "ORDERING",
        default_value = "unordered",
        help = "Mutation ordering: 'unordered' or 'per-account' (FIFO per account)"
    )]
    pub ordering: OrderingType,

    /// Capacity of each per-account mutation queue (per-account ordering only)
    #[arg(
        long = "queue-capacity",
        env = "LEDGER_QUEUE_CAPACITY",
        value_name = "SIZE",
        help = "Pending mutations allowed per account before rejecting (default: 1024)"
    )]
    pub queue_capacity: Option<usize>,

    /// Number of runtime worker threads
    #[arg(
        long = "worker-threads",
        env = "LEDGER_WORKER_THREADS",
        value_name = "COUNT",
        help = "Number of tokio worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Emit logs as JSON lines
    #[arg(long = "log-json", env = "LEDGER_LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Available mutation ordering policies
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum OrderingType {
    Unordered,
    PerAccount,
}

impl From<OrderingType> for OrderingPolicy {
    fn from(ordering: OrderingType) -> Self {
        match ordering {
            OrderingType::Unordered => OrderingPolicy::Unordered,
            OrderingType::PerAccount => OrderingPolicy::PerAccountFifo,
        }
    }
}

impl ServerArgs {
    /// Create a DispatcherConfig from CLI arguments
    ///
    /// Missing or zero values fall back to the defaults.
    pub fn to_dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig::new(
            self.ordering.clone().into(),
            self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY),
        )
    }

    /// Resolved worker thread count
    ///
    /// Missing or zero values fall back to the number of CPU cores.
    pub fn worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(0) => {
                let default = num_cpus::get();
                tracing::warn!(default, "invalid worker thread count 0, using default");
                default
            }
            Some(count) => count,
            None => num_cpus::get(),
        }
    }
}
