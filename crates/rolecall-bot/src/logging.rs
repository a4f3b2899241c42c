//! Structured logging setup.

use crate::error::{BotError, BotResult};
use rolecall_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// File name prefix of the daily rolling log.
pub const LOG_FILE_PREFIX: &str = "rolecall.log";

/// Builds the event filter: `RUST_LOG` when set, else the configured level,
/// else `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global tracing subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as the process logs.
pub fn init_logging(config: &LoggingConfig) -> BotResult<Option<WorkerGuard>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    layers.push(if config.json {
        fmt::layer().json().with_current_span(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    });

    let guard = config.file.as_ref().map(|directory| {
        let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
        );
        guard
    });

    tracing_subscriber::registry()
        .with(layers)
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| BotError::Logging(e.to_string()))?;

    Ok(guard)
}
