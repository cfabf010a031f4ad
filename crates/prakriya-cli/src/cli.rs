//! CLI argument definitions for the prakriya driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use prakriya_model::{Lakshana, Marker, Tag};
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "prakriya",
    version,
    about = "Derive Sanskrit verb stems by rule",
    long_about = "Derive Sanskrit verb stems by applying grammar rules to a dhātu and suffix.\n\n\
                  Input is SLP1. Results list every derivation the rules allow."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Read limits and gana lists from a TOML file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive every form of a dhātu before a suffix.
    Derive(DeriveArgs),

    /// List the pipeline stages and window rules in registration order.
    Rules,

    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Parser)]
pub struct DeriveArgs {
    /// Dhātu in SLP1, bare (`BU`) or in dhātupāṭha notation (`ga\mx~`).
    #[arg(value_name = "DHATU")]
    pub dhatu: String,

    /// Suffix upadeśa in SLP1, e.g. `Ral` or `atus`.
    #[arg(value_name = "SUFFIX")]
    pub suffix: String,

    /// Lakāra or other origin of the suffix. Repeatable.
    #[arg(short = 'l', long = "lakshana", value_name = "L", default_value = "li~w")]
    pub lakshana: Vec<Lakshana>,

    /// Extra it-marker on the suffix (e.g. `k` for kit). Repeatable.
    #[arg(short = 'm', long = "marker", value_name = "M")]
    pub markers: Vec<Marker>,

    /// Extra category on the suffix (e.g. `ardhadhatuka`). Repeatable.
    #[arg(short = 't', long = "tag", value_name = "T")]
    pub tags: Vec<Tag>,

    /// Show every step of each derivation.
    #[arg(long = "trace")]
    pub trace: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
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

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
