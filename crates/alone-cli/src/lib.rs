//! Command-line host for single-instance coordination.
//!
//! `alone run` holds an application's single-instance lock until Ctrl-C,
//! `alone status` inspects the lock record, and `alone paths` prints the
//! resolved locations.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary for logging setup
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::{Commands, InstanceArgs};
pub use error::CliError;
pub use parser::Cli;
