//! Application identity used to key every per-application OS resource.
//!
//! The lock file and the duplicate-launch channel are both derived from an
//! [`AppId`], so two applications never observe each other's lock or signal.

use std::fmt;

use tracing::warn;

/// Identifier used when the caller-supplied identifier sanitizes to nothing.
pub const DEFAULT_APP_IDENTIFIER: &str = "AloneApp_UniqueId";

/// Maximum identifier length in bytes, keeps `<id>.lock` under `NAME_MAX`.
pub const MAX_APP_ID_LEN: usize = 200;

/// A sanitized application identifier (e.g. a bundle id like `com.example.app`).
///
/// Only `[A-Za-z0-9_.-]` survive sanitization, so the identifier is always a
/// safe single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    /// Sanitize `raw` into an identifier.
    ///
    /// Invalid characters become `_`, runs of `_` collapse into one, and
    /// leading/trailing `_` are trimmed. An empty result falls back to
    /// [`DEFAULT_APP_IDENTIFIER`].
    pub fn new(raw: &str) -> Self {
        let mut sanitized = sanitize_name_part(raw);

        if sanitized.is_empty() {
            warn!(raw, "Application identifier is empty after sanitizing, using default");
            return Self(DEFAULT_APP_IDENTIFIER.to_string());
        }

        if sanitized.len() > MAX_APP_ID_LEN {
            warn!(
                len = sanitized.len(),
                max = MAX_APP_ID_LEN,
                "Application identifier is too long, truncating"
            );
            // Sanitized output is ASCII, so any byte index is a char boundary.
            sanitized.truncate(MAX_APP_ID_LEN);
        }

        Self(sanitized)
    }

    /// The sanitized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AppId {
    fn default() -> Self {
        Self(DEFAULT_APP_IDENTIFIER.to_string())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn sanitize_name_part(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ch = if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            ch
        } else {
            '_'
        };
        if ch == '_' && out.ends_with('_') {
            continue;
        }
        out.push(ch);
    }
    out.trim_matches('_').to_string()
}
