//! Logging configuration for kbrag

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},kbrag={level},tower_http={level}")))
}

/// Initialize logging from configuration
///
/// Console output always goes to stderr. When `file_output` is set, a daily
/// rolling file is written to `<log_dir>/kbrag.log.YYYY-MM-DD` as well.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = if config.file_output {
        if !config.log_dir.exists() {
            std::fs::create_dir_all(&config.log_dir)?;
        }
        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "kbrag.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The writer must outlive main
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed(),
        )
    } else {
        None
    };

    Registry::default()
        .with(env_filter(&config.level))
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized with level: {}", config.level);
    if config.file_output {
        tracing::info!(
            "Log files will be saved to: {}/kbrag.log.YYYY-MM-DD",
            config.log_dir.display()
        );
    }

    Ok(())
}

/// Initialize simple logging for tests and one-shot commands
pub fn init_simple_logging() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
