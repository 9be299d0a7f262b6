//! Logging setup.

use std::io::IsTerminal;

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Level defaults to `info` and can be changed with `RUST_LOG`.
/// Calling this more than once is harmless.
pub fn logger() {
    let format = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_file(false);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(format)
        .with(filter)
        .try_init();
}
