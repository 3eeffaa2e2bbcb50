//! Logging Infrastructure
//!
//! Human-readable tracing output on stderr so stdout stays clean for tables.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "sheetbase=info,sheet_client=info";

/// Filter for a `-v` count: 0 = default, 1 = debug, 2+ = trace
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_FILTER,
        1 => "sheetbase=debug,sheet_client=debug",
        _ => "sheetbase=trace,sheet_client=trace,reqwest=debug",
    }
}

/// Initialize the logger
///
/// `RUST_LOG` wins over the verbosity flag. Calling this twice is harmless.
pub fn init_logger(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
