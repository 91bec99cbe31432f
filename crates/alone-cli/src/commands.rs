//! Subcommands and their shared arguments.

use std::path::PathBuf;

use alone_core::InstanceConfig;
use clap::{Args, Subcommand};

/// Identifies the application whose lock a command works on.
#[derive(Args, Debug, Clone)]
pub struct InstanceArgs {
    /// Application identifier, e.g. a bundle id like "com.example.app"
    #[arg(long = "app-id")]
    pub app_id: String,

    /// Directory holding lock files (defaults to $ALONE_LOCK_DIR, then the
    /// per-user runtime dir)
    #[arg(long = "lock-dir")]
    pub lock_dir: Option<PathBuf>,
}

impl InstanceArgs {
    pub fn config(&self) -> InstanceConfig {
        let config = InstanceConfig::new(self.app_id.as_str());
        match &self.lock_dir {
            Some(dir) => config.with_lock_dir(dir),
            None => config,
        }
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Claim the single-instance lock and hold it until Ctrl-C
    Run {
        #[command(flatten)]
        instance: InstanceArgs,
    },

    /// Show the lock record and whether its owner is alive
    Status {
        #[command(flatten)]
        instance: InstanceArgs,
    },

    /// Show resolved lock and signal paths
    Paths {
        #[command(flatten)]
        instance: InstanceArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    #[test]
    fn run_accepts_lock_dir() {
        let cli = Cli::parse_from([
            "alone",
            "run",
            "--app-id",
            "com.example.app",
            "--lock-dir",
            "/tmp/alone-test",
        ]);
        let Commands::Run { instance } = cli.command else {
            panic!("expected run");
        };
        let config = instance.config();
        assert_eq!(config.app_id.as_str(), "com.example.app");
        assert_eq!(config.lock_dir, Some(PathBuf::from("/tmp/alone-test")));
    }

    #[test]
    fn app_id_is_sanitized_into_config() {
        let args = InstanceArgs {
            app_id: "My App".to_string(),
            lock_dir: None,
        };
        assert_eq!(args.config().app_id.as_str(), "My_App");
        assert_eq!(args.config().lock_dir, None);
    }

    #[test]
    fn app_id_is_required() {
        assert!(Cli::try_parse_from(["alone", "status"]).is_err());
    }
}
