//! CLI command definitions and handlers

mod init;
mod lint;
mod rules;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gocheck::models::Severity;
use gocheck::reporters::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

/// gocheck - lint rules for Go sources
#[derive(Parser, Debug)]
#[command(name = "gocheck")]
#[command(
    version,
    about = "Lint Go sources: error-variable naming, warning comments, comment density",
    after_help = "\
Examples:
  gocheck                               Lint every .go file under the current directory
  gocheck ./pkg ./cmd/server/main.go    Lint selected directories and files
  gocheck --format json -o report.json  JSON report written to a file
  gocheck --fail-on error               Exit code 1 if any error-severity failure (CI mode)
  gocheck rules                         List the available rules
  gocheck init                          Write a default gocheck.toml"
)]
pub struct Cli {
    /// Files or directories to lint (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Configuration file (default: gocheck.toml or .gocheck.json in the first path)
    #[arg(long, short = 'c', env = "GOCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Exit with code 1 if failures at or above this severity exist
    #[arg(long, value_parser = ["warning", "error"])]
    pub fail_on: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available rules
    Rules,

    /// Write a gocheck.toml with the default settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Some(Commands::Rules) => {
            rules::run();
            Ok(ExitCode::SUCCESS)
        }

        Some(Commands::Init { path }) => {
            init::run(path)?;
            Ok(ExitCode::SUCCESS)
        }

        None => {
            let format: OutputFormat = cli.format.parse()?;
            let fail_on = cli
                .fail_on
                .as_deref()
                .map(str::parse::<Severity>)
                .transpose()
                .map_err(anyhow::Error::msg)?;

            lint::run(lint::LintOptions {
                paths: &cli.paths,
                config: cli.config.as_deref(),
                format,
                output: cli.output.as_deref(),
                fail_on,
                color: !cli.no_color,
            })
        }
    }
}
