//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: fatal errors
//! - `warn`: dropped rows, untestable samples, skipped plots
//! - `info`: pipeline stage progress, summary counts
//! - `debug`: per-strategy normality results, fitted parameters
//! - `trace`: unused
//!
//! # Usage
//!
//! ```ignore
//! use perf_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default();
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events pass the default filter at the configured level.
const WORKSPACE_CRATES: [&str; 6] = [
    "perf_cli",
    "perf_common",
    "perf_ingest",
    "perf_model",
    "perf_report",
    "perf_transform",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for the workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the level filter when it is set.
    pub use_env_filter: bool,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to report span close events (JSON format only).
    pub with_spans: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global tracing subscriber with the given configuration.
///
/// This should be called once at application startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    tracing_subscriber::registry()
        .with(fmt_layer(config, writer))
        .init();
    Ok(())
}

/// The formatting layer for `config`, filtered by [`build_env_filter`].
pub fn fmt_layer(config: &LogConfig, writer: BoxMakeWriter) -> BoxedLayer {
    let filter = build_env_filter(config);
    let base = fmt::layer::<Registry>()
        .with_writer(writer)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Json => base
            .json()
            .with_span_events(if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => {
            let layer = base.compact().with_ansi(config.with_ansi);
            if config.with_timestamps {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
        LogFormat::Pretty => {
            let layer = base.with_ansi(config.with_ansi);
            if config.with_timestamps {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
    }
}

/// Default filter directives: workspace crates at `level_filter`, everything
/// else at warn.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let external = if level_filter < LevelFilter::WARN {
        level.clone()
    } else {
        "warn".to_string()
    };
    let mut directives = vec![external];
    directives.extend(
        WORKSPACE_CRATES
            .iter()
            .map(|name| format!("{name}={level}")),
    );
    directives.join(",")
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let directives = default_directives(config.level_filter);
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    } else {
        EnvFilter::new(directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("perf_transform=debug"));
        assert!(directives.contains("perf_cli=debug"));
    }

    #[test]
    fn quieter_levels_apply_everywhere() {
        assert_eq!(
            default_directives(LevelFilter::OFF).split(',').next(),
            Some("off")
        );
        assert_eq!(
            default_directives(LevelFilter::ERROR).split(',').next(),
            Some("error")
        );
    }
}
