//! Barflow Observability Module
//!
//! Installs the global `tracing` subscriber shared by the server and the CLI.
//!
//! # Configuration
//!
//! - `RUST_LOG`: full filter directive, takes precedence when set
//! - `LOG_LEVEL`: level for Barflow crates when `RUST_LOG` is unset (default: "info")
//! - `LOG_DIR`: when set, structured JSON logs are also written to a daily
//!   rolling file `barflow.json` in that directory
//!
//! # Examples
//!
//! ```no_run
//! barflow_observability::init_tracing();
//! tracing::info!("ready");
//! ```

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Settings for [`init_tracing_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!(
            "barflow={level},barflow_cli={level},tower_http=warn,hyper=warn,axum::rejection=trace",
            level = self.log_level
        )
    }
}

/// Initialize logging from the environment.
pub fn init_tracing() {
    init_tracing_with(&LoggingConfig::from_env());
}

/// Initialize logging with an explicit configuration.
///
/// Calling it twice is harmless: the second global subscriber is rejected
/// and a note is printed to stderr.
pub fn init_tracing_with(config: &LoggingConfig) {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // JSON file layer for structured logs (can be ingested by Loki)
    let json_layer = config.log_dir.as_ref().map(|dir| {
        let json_appender = RollingFileAppender::new(Rotation::DAILY, dir, "barflow.json");
        fmt::layer()
            .json()
            .with_writer(json_appender)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(EnvFilter::new(config.default_directive()))
    });

    let result = tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
