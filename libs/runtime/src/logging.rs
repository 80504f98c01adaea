//! Console logging setup for the binaries.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default level.
fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initialize console logging.
///
/// A `RUST_LOG` directive takes precedence over the `-v` count when set.
pub fn init(verbose: u8) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbose).into())
        .from_env_lossy();

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}
