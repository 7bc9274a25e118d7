use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogLevel};

/// Initializes the global `tracing` subscriber from the configured level and
/// format.
///
/// `RUST_LOG` always overrides `logLevel` when set.
pub fn init_logging(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_tracing_level().to_string()));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}
