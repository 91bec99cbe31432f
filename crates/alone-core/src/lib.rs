//! Core domain types and port definitions for single-instance coordination.
//!
//! This crate is pure: it derives names and paths from an application
//! identifier, defines the coordinator's states and outcomes, and declares
//! the ports (`LivenessProbe`, `InstanceLock`, `LaunchSignal`) that
//! `alone-runtime` implements against the operating system.
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod paths;
pub mod ports;

pub use config::InstanceConfig;
pub use domain::{CoordinatorState, LaunchDecision};
pub use error::InstanceError;
pub use identity::{AppId, DEFAULT_APP_IDENTIFIER};
pub use paths::{InstancePaths, PathError};
pub use ports::{
    DuplicateLaunchHandler, InstanceLock, LaunchSignal, LivenessProbe, LockFailure,
    NoopLaunchSignal, SignalError, SignalSubscription,
};
