use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global tracing subscriber.
///
/// Diagnostics go to a file when YUANFEN_LOG_FILE is set (keeping the
/// interactive terminal clean), otherwise to stderr. RUST_LOG overrides the
/// default info level.
pub fn init_tracing() {
    let file_logging = std::env::var("YUANFEN_LOG_FILE").ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(log_path) = file_logging {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .expect("Failed to open log file");

        let file_layer = fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(file_layer).init();
        eprintln!("File logging enabled: {}", log_path);
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(stderr_layer).init();
    }
}
