//! Duplicate-launch channel naming.
//!
//! The channel name is derived from the application identifier so that
//! unrelated applications never wake each other. The socket endpoint is a
//! short digest of the channel name: Unix socket paths are limited to ~104
//! bytes and bundle identifiers can be long.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::identity::AppId;

/// Suffix appended to the application identifier to form the channel name.
const CHANNEL_SUFFIX: &str = ".launch";

/// Number of digest bytes encoded into the endpoint filename.
const ENDPOINT_DIGEST_BYTES: usize = 8;

/// Channel name used to signal the running owner of `app_id`.
pub fn signal_channel(app_id: &AppId) -> String {
    format!("{app_id}{CHANNEL_SUFFIX}")
}

/// Filesystem endpoint for `channel` under `root`.
///
/// Format: `<root>/sig-<16 hex chars>.sock`
pub fn signal_endpoint(root: &Path, channel: &str) -> PathBuf {
    let digest = Sha256::digest(channel.as_bytes());
    let mut name = String::from("sig-");
    for byte in &digest[..ENDPOINT_DIGEST_BYTES] {
        let _ = write!(name, "{byte:02x}");
    }
    name.push_str(".sock");
    root.join(name)
}
