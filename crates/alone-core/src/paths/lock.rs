//! Lock file path derivation.

use std::path::{Path, PathBuf};

use crate::identity::AppId;

/// Path of the lock record for `app_id` under `root`.
///
/// Format: `<root>/<app_id>.lock`
pub fn lock_path(root: &Path, app_id: &AppId) -> PathBuf {
    root.join(format!("{app_id}.lock"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_is_under_root() {
        let root = Path::new("/run/user/1000/alone");
        let path = lock_path(root, &AppId::new("com.example.app"));
        assert_eq!(path, root.join("com.example.app.lock"));
    }
}
