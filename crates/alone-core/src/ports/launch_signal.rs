//! Duplicate-launch signal port.
//!
//! A payload-less, best-effort broadcast keyed by a channel name. Delivery is
//! at most once per post with no ordering guarantee, and nothing is queued
//! when no owner is listening.
//!
//! # Implementations
//!
//! - `NoopLaunchSignal` - discards posts and never delivers
//! - Adapter-specific implementations (Unix datagram socket, etc.)

use std::sync::Arc;

use thiserror::Error;

/// Callback invoked on the owner once per received duplicate-launch signal.
///
/// May be called from an arbitrary thread.
pub type DuplicateLaunchHandler = Arc<dyn Fn() + Send + Sync>;

/// Errors from posting or subscribing. Callers log these and move on.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Nobody is listening on the channel.
    #[error("No listener on channel {0}")]
    NoListener(String),

    /// The channel endpoint could not be created or reached.
    #[error("Channel {channel} unavailable: {reason}")]
    Unavailable { channel: String, reason: String },
}

/// An active registration for duplicate-launch signals.
///
/// Dropping a subscription cancels it.
pub trait SignalSubscription: Send {
    /// Stop receiving signals. Idempotent.
    fn cancel(&mut self);
}

/// Port for the cross-process "someone launched me again" channel.
pub trait LaunchSignal: Send + Sync {
    /// Post one signal on `channel`. Never blocks.
    fn post(&self, channel: &str) -> Result<(), SignalError>;

    /// Deliver signals posted on `channel` to `handler` until cancelled.
    fn subscribe(
        &self,
        channel: &str,
        handler: DuplicateLaunchHandler,
    ) -> Result<Box<dyn SignalSubscription>, SignalError>;
}

impl<T: LaunchSignal + ?Sized> LaunchSignal for Arc<T> {
    fn post(&self, channel: &str) -> Result<(), SignalError> {
        (**self).post(channel)
    }

    fn subscribe(
        &self,
        channel: &str,
        handler: DuplicateLaunchHandler,
    ) -> Result<Box<dyn SignalSubscription>, SignalError> {
        (**self).subscribe(channel, handler)
    }
}

/// A launch signal that goes nowhere.
///
/// Suitable for hosts that do not need foregrounding, and for tests.
#[derive(Debug, Clone, Default)]
pub struct NoopLaunchSignal;

impl NoopLaunchSignal {
    /// Create a new no-op signal.
    pub const fn new() -> Self {
        Self
    }
}

struct NoopSubscription;

impl SignalSubscription for NoopSubscription {
    fn cancel(&mut self) {}
}

impl LaunchSignal for NoopLaunchSignal {
    fn post(&self, channel: &str) -> Result<(), SignalError> {
        Err(SignalError::NoListener(channel.to_string()))
    }

    fn subscribe(
        &self,
        _channel: &str,
        _handler: DuplicateLaunchHandler,
    ) -> Result<Box<dyn SignalSubscription>, SignalError> {
        Ok(Box::new(NoopSubscription))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn noop_post_reports_no_listener() {
        let signal = NoopLaunchSignal::new();
        let err = signal.post("com.example.app.launch").unwrap_err();
        assert!(matches!(err, SignalError::NoListener(_)));
    }

    #[test]
    fn noop_subscription_never_delivers() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let signal: Arc<dyn LaunchSignal> = Arc::new(NoopLaunchSignal::new());

        let mut sub = signal
            .subscribe(
                "com.example.app.launch",
                Arc::new(move || {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .expect("subscribe");
        let _ = signal.post("com.example.app.launch");
        sub.cancel();
        sub.cancel();

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
