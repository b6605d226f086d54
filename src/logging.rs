//! Diagnostic logging to stderr.
//!
//! Filtering follows `PINNOTES_LOG` (same syntax as `RUST_LOG`). Without it
//! only warnings are shown, or debug output for this crate with `--verbose`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PINNOTES_LOG";

pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,pinnotes=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
