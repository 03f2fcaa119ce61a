//! Logging setup for the binary

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Log level for the tool's own diagnostics.
///
/// Independent of subprocess stderr forwarding, which the transport handles.
pub fn log_filter(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber writing to stderr.
pub fn setup_logging(debug: bool) {
    let filter = log_filter(debug);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let result = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init();
    if let Err(e) = result {
        eprintln!("Error: Failed to set up logging: {}", e);
    }

    tracing::debug!("Debug mode: {}", filter);
}
