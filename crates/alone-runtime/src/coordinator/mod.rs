//! Single-instance coordination.
//!
//! The coordinator drives one launch attempt through
//! `Idle -> Attempting -> {Owner, Rejected}` and, for owners, on to
//! `Disposed`.
//!
//! # Launch check
//! 1. Try the lock. Success makes this process the owner: record our PID,
//!    subscribe to duplicate-launch signals.
//! 2. Otherwise read the recorded owner PID. A live owner gets one
//!    duplicate-launch signal and this launch is rejected.
//! 3. An unreadable or dead owner means the lock is stale: delete it and
//!    retry exactly once. Losing that retry is an error, never a guess. A
//!    path that cannot be removed or locked at all is a separate,
//!    non-transient error.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use alone_core::{
    CoordinatorState, DuplicateLaunchHandler, InstanceConfig, InstanceError, InstanceLock,
    InstancePaths, LaunchDecision, LaunchSignal, LivenessProbe, LockFailure, SignalError,
    SignalSubscription,
};
use tracing::{debug, error, info, warn};

use crate::liveness::{ProcessLivenessProbe, current_pid};
use crate::lockfile::LockManager;
use crate::signal::SocketLaunchSignal;


/// Pause before re-reading an empty record; a new holder writes its PID
/// right after locking.
const RECORD_GRACE: Duration = Duration::from_millis(50);

/// Coordinates one process's claim on its application's single-instance lock.
///
/// The lock is owned explicitly; dropping the coordinator disposes it.
pub struct InstanceCoordinator<
    L = LockManager,
    P = ProcessLivenessProbe,
    S = SocketLaunchSignal,
> where
    L: InstanceLock,
    P: LivenessProbe,
    S: LaunchSignal,
{
    lock: L,
    probe: P,
    signal: S,
    channel: String,
    on_duplicate: DuplicateLaunchHandler,
    pid: i32,
    state: CoordinatorState,
    accepting: Arc<AtomicBool>,
    subscription: Option<Box<dyn SignalSubscription>>,
}

impl InstanceCoordinator {
    /// Wire the OS adapters for `config`.
    ///
    /// `on_duplicate` runs on the owner, on the signal listener thread, once
    /// per duplicate launch.
    pub fn from_config(
        config: &InstanceConfig,
        on_duplicate: DuplicateLaunchHandler,
    ) -> Result<Self, InstanceError> {
        let paths = InstancePaths::resolve(config)?;
        debug!(app_id = %config.app_id, lock = %paths.lock_path.display(), "Resolved instance paths");

        Ok(Self::new(
            LockManager::for_paths(&paths),
            ProcessLivenessProbe::new(),
            SocketLaunchSignal::for_paths(&paths),
            paths.signal_channel,
            on_duplicate,
        ))
    }
}

impl<L, P, S> InstanceCoordinator<L, P, S>
where
    L: InstanceLock,
    P: LivenessProbe,
    S: LaunchSignal,
{
    /// Build a coordinator from explicit collaborators.
    pub fn new(
        lock: L,
        probe: P,
        signal: S,
        channel: impl Into<String>,
        on_duplicate: DuplicateLaunchHandler,
    ) -> Self {
        Self {
            lock,
            probe,
            signal,
            channel: channel.into(),
            on_duplicate,
            pid: current_pid(),
            state: CoordinatorState::Idle,
            accepting: Arc::new(AtomicBool::new(false)),
            subscription: None,
        }
    }

    /// Record `pid` instead of the calling process's PID.
    #[must_use]
    pub fn with_pid(mut self, pid: i32) -> Self {
        self.pid = pid;
        self
    }

    pub const fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    pub fn lock_path(&self) -> &Path {
        self.lock.path()
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Decide whether this process may run.
    ///
    /// Returns `Owner` (again, without side effects) if already the owner and
    /// re-attempts from `Rejected`. After either error the coordinator is
    /// back in `Idle`.
    pub fn check_and_run(&mut self) -> Result<LaunchDecision, InstanceError> {
        match self.state {
            CoordinatorState::Owner => return Ok(LaunchDecision::Owner),
            CoordinatorState::Disposed => return Err(InstanceError::Disposed),
            CoordinatorState::Idle
            | CoordinatorState::Attempting
            | CoordinatorState::Rejected => {}
        }
        self.state = CoordinatorState::Attempting;

        if self.lock.acquire() {
            return Ok(self.become_owner());
        }

        match self.read_owner_record() {
            Some(owner_pid) if self.probe.is_alive(owner_pid) => {
                info!(owner_pid, channel = %self.channel, "Another instance is running");
                self.notify_owner();
                self.state = CoordinatorState::Rejected;
                return Ok(LaunchDecision::AlreadyRunning { owner_pid });
            }
            Some(owner_pid) => {
                warn!(owner_pid, path = %self.lock.path().display(), "Lock owner is dead, reclaiming stale lock");
            }
            None => {
                warn!(path = %self.lock.path().display(), "Lock record is unreadable, reclaiming stale lock");
            }
        }

        let retried = self
            .lock
            .reclaim_stale()
            .and_then(|()| self.lock.try_acquire());

        match retried {
            Ok(()) => Ok(self.become_owner()),
            Err(LockFailure::Contended) => {
                error!(path = %self.lock.path().display(), "Another launch took the reclaimed lock first");
                self.state = CoordinatorState::Idle;
                Err(InstanceError::ReclaimRaceLost {
                    lock_path: self.lock.path().to_path_buf(),
                })
            }
            Err(LockFailure::Io(reason)) => {
                error!(path = %self.lock.path().display(), reason = %reason, "Instance lock path is unusable");
                self.state = CoordinatorState::Idle;
                Err(InstanceError::LockUnavailable {
                    lock_path: self.lock.path().to_path_buf(),
                    reason,
                })
            }
        }
    }

    /// Release everything an owner holds. No-op in any other state.
    pub fn dispose(&mut self) {
        if self.state != CoordinatorState::Owner {
            return;
        }

        self.accepting.store(false, Ordering::Release);
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.lock.release();
        self.state = CoordinatorState::Disposed;

        info!(pid = self.pid, channel = %self.channel, "Instance coordinator disposed");
    }

    fn become_owner(&mut self) -> LaunchDecision {
        self.lock.write_owner_id(self.pid);
        self.accepting.store(true, Ordering::Release);

        let accepting = Arc::clone(&self.accepting);
        let on_duplicate = Arc::clone(&self.on_duplicate);
        let guarded: DuplicateLaunchHandler = Arc::new(move || {
            if accepting.load(Ordering::Acquire) {
                on_duplicate();
            } else {
                debug!("Ignoring duplicate-launch signal outside owner state");
            }
        });

        match self.signal.subscribe(&self.channel, guarded) {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(e) => {
                warn!(channel = %self.channel, error = %e, "Duplicate launches will not be reported");
            }
        }

        self.state = CoordinatorState::Owner;
        info!(pid = self.pid, path = %self.lock.path().display(), "Running as the single instance");
        LaunchDecision::Owner
    }

    fn read_owner_record(&self) -> Option<i32> {
        self.lock.read_owner_id().or_else(|| {
            thread::sleep(RECORD_GRACE);
            self.lock.read_owner_id()
        })
    }

    fn notify_owner(&self) {
        match self.signal.post(&self.channel) {
            Ok(()) => debug!(channel = %self.channel, "Asked running instance to foreground"),
            Err(SignalError::NoListener(_)) => {
                debug!(channel = %self.channel, "Running instance is not listening");
            }
            Err(e) => warn!(channel = %self.channel, error = %e, "Failed to signal running instance"),
        }
    }
}

impl<L, P, S> Drop for InstanceCoordinator<L, P, S>
where
    L: InstanceLock,
    P: LivenessProbe,
    S: LaunchSignal,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
