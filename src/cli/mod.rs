// CLI module
// Command-line and environment configuration for the server

mod args;

pub use args::{OrderingType, ServerArgs};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Every flag can also be supplied through its `LEDGER_*` environment
/// variable. On invalid arguments or `--help`, clap prints a message and
/// exits the process.
pub fn parse_args() -> ServerArgs {
    ServerArgs::parse()
}
