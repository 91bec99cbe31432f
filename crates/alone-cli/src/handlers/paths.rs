//! Paths command handler.

use alone_core::InstancePaths;

use crate::commands::InstanceArgs;
use crate::error::CliError;

/// Resolve and print every path used for the application.
pub fn execute(args: &InstanceArgs) -> Result<(), CliError> {
    let paths = InstancePaths::resolve(&args.config())?;
    println!("{paths}");
    Ok(())
}
