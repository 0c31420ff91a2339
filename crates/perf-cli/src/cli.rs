//! CLI argument definitions for performance tiering.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use perf_cli::logging::{LogConfig, LogFormat};
use perf_cli::types::{DEFAULT_ALPHA, DEFAULT_BINS};

#[derive(Parser)]
#[command(
    name = "perf-tiers",
    version,
    about = "Employee performance tiering with normality-driven transformation selection",
    long_about = "Score employees from a performance CSV, test the score distribution \
                  for normality, pick the transformation that normalizes it best and \
                  bucket employees into Poor, Average, Good and Best tiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration. An explicit `--log-level` beats `-v`/`-q`,
    /// and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
            },
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze an employee CSV and write tiers, summary and plots.
    Analyze(AnalyzeArgs),

    /// List the transformation strategies in evaluation order.
    Strategies,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Employee performance CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Significance level for the Shapiro-Wilk test.
    #[arg(long = "alpha", value_name = "A", default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Upper quantile at which each score field is capped.
    #[arg(
        long = "cap-quantile",
        value_name = "Q",
        default_value_t = perf_ingest::DEFAULT_CAP_QUANTILE,
        conflicts_with = "no_cap"
    )]
    pub cap_quantile: f64,

    /// Do not cap score fields.
    #[arg(long = "no-cap")]
    pub no_cap: bool,

    /// Number of histogram bins.
    #[arg(long = "bins", value_name = "N", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Skip PNG plot generation.
    #[arg(long = "no-plots")]
    pub no_plots: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
