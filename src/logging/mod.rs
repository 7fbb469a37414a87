//! Logging initialization
//!
//! The API server picks its format from `APP_ENV`: JSON lines in production
//! for log aggregation, colored human-readable output everywhere else. The
//! CLI logs compactly to stderr so stdout carries only the report.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Server format for a deployment environment name.
    pub fn for_environment(env: &str) -> Self {
        match env {
            "production" | "prod" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// `RUST_LOG` when set, otherwise `default_directive`.
fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize logging for the API server based on `APP_ENV`
pub fn init_logging() {
    let filter = env_filter("info");
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::for_environment(&get_environment()) {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init(),
    }
}

/// Initialize logging for the command-line tool. Only warnings are shown
/// unless `verbose` is set or `RUST_LOG` says otherwise.
pub fn init_cli_logging(verbose: bool) {
    let filter = env_filter(if verbose { "cyclescope=debug,warn" } else { "warn" });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
