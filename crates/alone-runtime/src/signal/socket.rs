//! Duplicate-launch signal over a Unix datagram socket.
//!
//! The owner binds a datagram socket at the channel's endpoint and runs a
//! listener thread; a duplicate launch sends one byte to that path. Posting
//! never blocks and nothing is queued when no owner is bound.

use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use alone_core::paths::signal_endpoint;
use alone_core::{
    DuplicateLaunchHandler, InstancePaths, LaunchSignal, SignalError, SignalSubscription,
};
use tracing::{debug, warn};

/// Payload of a wake-up datagram. Receivers ignore the contents.
const WAKE_BYTE: u8 = 1;

/// How often the listener re-checks its shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Launch signal backed by socket files under a lock root.
#[derive(Debug, Clone)]
pub struct SocketLaunchSignal {
    root: PathBuf,
}

impl SocketLaunchSignal {
    /// Signal whose endpoints live under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Signal for a resolved application.
    pub fn for_paths(paths: &InstancePaths) -> Self {
        Self::new(paths.lock_root.clone())
    }

    fn endpoint(&self, channel: &str) -> PathBuf {
        signal_endpoint(&self.root, channel)
    }
}

impl LaunchSignal for SocketLaunchSignal {
    fn post(&self, channel: &str) -> Result<(), SignalError> {
        let endpoint = self.endpoint(channel);
        let socket = UnixDatagram::unbound().map_err(|e| unavailable(channel, &e))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| unavailable(channel, &e))?;

        match socket.send_to(&[WAKE_BYTE], &endpoint) {
            Ok(_) => {
                debug!(channel, endpoint = %endpoint.display(), "Posted duplicate-launch signal");
                Ok(())
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused
                ) =>
            {
                Err(SignalError::NoListener(channel.to_string()))
            }
            Err(e) => Err(unavailable(channel, &e)),
        }
    }

    fn subscribe(
        &self,
        channel: &str,
        handler: DuplicateLaunchHandler,
    ) -> Result<Box<dyn SignalSubscription>, SignalError> {
        let endpoint = self.endpoint(channel);

        // Only the lock owner binds, so anything already here is a leftover
        match fs::remove_file(&endpoint) {
            Ok(()) => debug!(endpoint = %endpoint.display(), "Removed leftover signal endpoint"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(unavailable(channel, &e)),
        }

        let socket = UnixDatagram::bind(&endpoint).map_err(|e| unavailable(channel, &e))?;
        socket
            .set_read_timeout(Some(POLL_INTERVAL))
            .map_err(|e| unavailable(channel, &e))?;
        let inode = fs::metadata(&endpoint).map(|m| m.ino()).ok();

        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = Arc::clone(&shutdown);
        let thread_channel = channel.to_string();
        let handle = thread::Builder::new()
            .name("alone-launch-signal".to_string())
            .spawn(move || listen(&socket, &thread_shutdown, &handler, &thread_channel))
            .map_err(|e| unavailable(channel, &e))?;

        debug!(channel, endpoint = %endpoint.display(), "Listening for duplicate launches");

        Ok(Box::new(SocketSubscription {
            endpoint,
            inode,
            shutdown,
            handle: Some(handle),
        }))
    }
}

fn listen(
    socket: &UnixDatagram,
    shutdown: &AtomicBool,
    handler: &DuplicateLaunchHandler,
    channel: &str,
) {
    let mut buf = [0u8; 16];
    loop {
        if shutdown.load(Ordering::Acquire) {
            break;
        }
        match socket.recv(&mut buf) {
            Ok(_) => {
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
                debug!(channel, "Received duplicate-launch signal");
                handler();
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => {
                warn!(channel, error = %e, "Launch signal listener stopped");
                break;
            }
        }
    }
}

fn unavailable(channel: &str, err: &io::Error) -> SignalError {
    SignalError::Unavailable {
        channel: channel.to_string(),
        reason: err.to_string(),
    }
}

struct SocketSubscription {
    endpoint: PathBuf,
    inode: Option<u64>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SocketSubscription {
    fn endpoint_is_ours(&self, path: &Path) -> bool {
        match (self.inode, fs::metadata(path)) {
            (Some(ours), Ok(current)) => ours == current.ino(),
            _ => false,
        }
    }
}

impl SignalSubscription for SocketSubscription {
    fn cancel(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.shutdown.store(true, Ordering::Release);
        if handle.join().is_err() {
            warn!(endpoint = %self.endpoint.display(), "Launch signal handler panicked");
        }

        if self.endpoint_is_ours(&self.endpoint)
            && let Err(e) = fs::remove_file(&self.endpoint)
        {
            debug!(endpoint = %self.endpoint.display(), error = %e, "Failed to remove signal endpoint");
        }
    }
}

impl Drop for SocketSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn counting_handler() -> (DuplicateLaunchHandler, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let handler: DuplicateLaunchHandler = Arc::new(move || {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(());
            }
        });
        (handler, rx)
    }

    #[test]
    fn post_without_listener_reports_no_listener() {
        let temp = tempfile::tempdir().expect("tempdir");
        let signal = SocketLaunchSignal::new(temp.path());

        let err = signal.post("com.example.app.launch").unwrap_err();
        assert!(matches!(err, SignalError::NoListener(_)));
    }

    #[test]
    fn each_post_is_delivered_once() {
        let temp = tempfile::tempdir().expect("tempdir");
        let signal = SocketLaunchSignal::new(temp.path());
        let (handler, rx) = counting_handler();

        let _sub = signal
            .subscribe("com.example.app.launch", handler)
            .expect("subscribe");

        signal.post("com.example.app.launch").expect("first post");
        signal.post("com.example.app.launch").expect("second post");

        rx.recv_timeout(Duration::from_secs(2)).expect("first delivery");
        rx.recv_timeout(Duration::from_secs(2)).expect("second delivery");
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }

    #[test]
    fn channels_are_isolated() {
        let temp = tempfile::tempdir().expect("tempdir");
        let signal = SocketLaunchSignal::new(temp.path());
        let (handler, rx) = counting_handler();

        let _sub = signal
            .subscribe("com.example.a.launch", handler)
            .expect("subscribe");

        let err = signal.post("com.example.b.launch").unwrap_err();
        assert!(matches!(err, SignalError::NoListener(_)));
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }

    #[test]
    fn cancel_stops_delivery_and_removes_endpoint() {
        let temp = tempfile::tempdir().expect("tempdir");
        let signal = SocketLaunchSignal::new(temp.path());
        let (handler, _rx) = counting_handler();
        let endpoint = signal.endpoint("com.example.app.launch");

        let mut sub = signal
            .subscribe("com.example.app.launch", handler)
            .expect("subscribe");
        assert!(endpoint.exists());

        sub.cancel();
        sub.cancel();

        assert!(!endpoint.exists());
        assert!(matches!(
            signal.post("com.example.app.launch"),
            Err(SignalError::NoListener(_))
        ));
    }

    #[test]
    fn subscribe_replaces_leftover_endpoint() {
        let temp = tempfile::tempdir().expect("tempdir");
        let signal = SocketLaunchSignal::new(temp.path());
        let endpoint = signal.endpoint("com.example.app.launch");

        // A crashed owner leaves its socket file behind
        let leftover = UnixDatagram::bind(&endpoint).expect("bind leftover");
        drop(leftover);
        assert!(endpoint.exists());

        let (handler, rx) = counting_handler();
        let _sub = signal
            .subscribe("com.example.app.launch", handler)
            .expect("subscribe over leftover");

        signal.post("com.example.app.launch").expect("post");
        rx.recv_timeout(Duration::from_secs(2)).expect("delivery");
    }
}
