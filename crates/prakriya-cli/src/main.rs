//! Prakriya CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use prakriya_cli::cli::Cli;
use prakriya_cli::commands;
use prakriya_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match commands::run(&cli) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging from flags. An explicit `--log-level` beats `-v`/`-q`, and
/// either one switches `RUST_LOG` off.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_env_filter(!explicit)
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi)
}
