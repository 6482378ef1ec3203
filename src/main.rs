//! Account Ledger server
//!
//! Serves the in-memory ledger over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --bind 127.0.0.1:3000
//! cargo run -- --ordering per-account --queue-capacity 256
//! RUST_LOG=debug cargo run -- --log-json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown (Ctrl-C)
//! - 1: Error (runtime could not start, address already in use, etc.)

use std::sync::Arc;

use account_ledger::api;
use account_ledger::cli;
use account_ledger::core::{AccountStore, MutationDispatcher};
use account_ledger::observability;
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    observability::init(args.log_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.worker_threads())
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    runtime.block_on(async {
        let store = Arc::new(AccountStore::new());
        let dispatcher = MutationDispatcher::new(Arc::clone(&store), args.to_dispatcher_config());
        tracing::info!(config = ?dispatcher.config(), "ledger ready");

        let app = api::build_app(dispatcher);

        let listener = tokio::net::TcpListener::bind(args.bind)
            .await
            .with_context(|| format!("failed to bind {}", args.bind))?;
        tracing::info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        // Nothing is persisted: the ledger ends with the process.
        tracing::info!(accounts = store.len(), "shut down");
        Ok::<(), anyhow::Error>(())
    })
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
