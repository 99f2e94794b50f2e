pub mod gql;

pub use gql::*;

use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the `tracing` subscriber used by the command-line tool.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Colors are only used when stderr is a
/// terminal.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
