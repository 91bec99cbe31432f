//! Command handlers.
//!
//! Handlers are thin: build an [`InstanceConfig`](alone_core::InstanceConfig)
//! from the arguments, call into `alone-runtime`, and format the result for
//! the terminal.

pub mod paths;
pub mod run;
pub mod status;

use crate::commands::Commands;

/// Route a parsed command to its handler.
///
/// Handler failures carry a [`CliError`](crate::CliError) so the binary can
/// map them to an exit code.
pub async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run { instance } => run::execute(&instance).await?,
        Commands::Status { instance } => status::execute(&instance)?,
        Commands::Paths { instance } => paths::execute(&instance)?,
    }
    Ok(())
}
