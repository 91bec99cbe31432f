//! Per-application configuration supplied by the host.

use std::path::{Path, PathBuf};

use crate::identity::AppId;

/// What the host tells the coordinator about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Sanitized application identifier.
    pub app_id: AppId,

    /// Lock root override. `None` resolves through `ALONE_LOCK_DIR` and the
    /// platform defaults.
    pub lock_dir: Option<PathBuf>,
}

impl InstanceConfig {
    /// Configuration for `app_id` with the default lock root.
    pub fn new(app_id: impl Into<AppId>) -> Self {
        Self {
            app_id: app_id.into(),
            lock_dir: None,
        }
    }

    /// Place the lock file and signal endpoint under `dir`.
    #[must_use]
    pub fn with_lock_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.lock_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}
