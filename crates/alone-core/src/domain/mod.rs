//! Core domain types.
//!
//! These types describe the coordinator's lifecycle and its answers to the
//! host, independent of any filesystem or socket concerns.

mod decision;
mod state;

pub use decision::LaunchDecision;
pub use state::CoordinatorState;
