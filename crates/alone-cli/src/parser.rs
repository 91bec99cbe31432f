//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for single-instance coordination.
#[derive(Parser)]
#[command(name = "alone")]
#[command(about = "Run an application as a single instance per user")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["alone", "--verbose", "paths", "--app-id", "com.example.app"]);
        assert!(cli.verbose);
        assert_eq!(cli.default_log_filter(), "debug");
    }

    #[test]
    fn test_quiet_by_default() {
        let cli = Cli::parse_from(["alone", "status", "--app-id", "com.example.app"]);
        assert_eq!(cli.default_log_filter(), "warn");
    }
}
