//! Diagnostic tracing for the core and the CLI.
//!
//! The core only emits `tracing` events; nothing is printed unless the binary
//! installs a subscriber with [`init`]. User-facing output goes through
//! `CmdResult` messages, never through tracing.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `scriptdeck=debug`
/// and the default is `warn`.
///
/// ```bash
/// RUST_LOG=scriptdeck=debug scriptdeck export fountain
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "scriptdeck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
