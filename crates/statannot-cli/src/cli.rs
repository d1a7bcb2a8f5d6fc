//! CLI argument definitions for statannot.

use std::path::PathBuf;

use std::io::{self, IsTerminal};

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "statannot",
    version,
    about = "Resolve statistical-test results into chart annotations",
    long_about = "Resolve a table of statistical-test results into p-value annotations.\n\n\
                  Each row of the results table describes one comparison. Rows are turned\n\
                  into brackets spanning two groups, or into plain text labels."
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
    /// Build logging configuration from CLI flags with consistent precedence.
    ///
    /// `--log-level` wins over `-v`/`-q`; `RUST_LOG` is only honoured when
    /// neither was given.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            level_filter: self.verbosity.tracing_level_filter(),
            ..LogConfig::default()
        };
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        if let Some(level) = self.log_level {
            config.level_filter = match level {
                LogLevelArg::Error => LevelFilter::ERROR,
                LogLevelArg::Warn => LevelFilter::WARN,
                LogLevelArg::Info => LevelFilter::INFO,
                LogLevelArg::Debug => LevelFilter::DEBUG,
                LogLevelArg::Trace => LevelFilter::TRACE,
            };
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a results table into an annotation layer.
    Resolve(ResolveArgs),

    /// List the columns of a results table.
    Columns(TableArgs),
}

#[derive(Args)]
pub struct TableArgs {
    /// Path to the results table (CSV).
    #[arg(value_name = "RESULTS_CSV")]
    pub results: PathBuf,

    /// Field separator.
    #[arg(long = "separator", default_value_t = ',')]
    pub separator: char,

    /// Infer numeric column types instead of reading every column as text.
    ///
    /// Inferred columns are re-rendered, so `01` becomes `1` and `0.050`
    /// becomes `0.05`.
    #[arg(long = "infer-types")]
    pub infer_types: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Label column, or a template such as "p = {p.adj}".
    #[arg(long = "label", default_value = "p")]
    pub label: String,

    /// Column holding the y-position of each annotation.
    #[arg(long = "y-position", value_name = "COLUMN", conflicts_with = "y_values")]
    pub y_position: Option<String>,

    /// Literal y-positions, repeated to cover every row.
    #[arg(long = "y-values", value_name = "Y", value_delimiter = ',')]
    pub y_values: Option<Vec<f64>>,

    /// Column holding the left bracket position [default: group1].
    #[arg(long = "xmin", value_name = "COLUMN")]
    pub xmin: Option<String>,

    /// Column holding the right bracket position.
    #[arg(long = "xmax", value_name = "COLUMN", default_value = "group2")]
    pub xmax: String,

    /// Draw text labels instead of brackets.
    #[arg(long = "no-xmax")]
    pub no_xmax: bool,

    /// Column of x positions for plain text labels (implies --no-xmax).
    #[arg(long = "x", value_name = "COLUMN")]
    pub x: Option<String>,

    /// Drop brackets when every comparison shares one reference group.
    #[arg(long = "remove-bracket")]
    pub remove_bracket: bool,

    /// Hide non-significant ("ns") comparisons.
    #[arg(long = "hide-ns")]
    pub hide_ns: bool,

    /// Base text size.
    #[arg(long = "size", default_value_t = 3.88)]
    pub size: f64,

    /// Label text size [default: --size].
    #[arg(long = "label-size")]
    pub label_size: Option<f64>,

    /// Bracket line width.
    #[arg(long = "bracket-size", default_value_t = 0.3)]
    pub bracket_size: f64,

    /// Bracket tip length as a fraction of the plot height.
    #[arg(long = "tip-length", default_value_t = 0.03)]
    pub tip_length: f64,

    /// Vertical justification of the labels.
    #[arg(long = "vjust", default_value_t = 0.0, allow_hyphen_values = true)]
    pub vjust: f64,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Write the annotation layer to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Table,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
