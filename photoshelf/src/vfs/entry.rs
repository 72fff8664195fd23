//! Resolved filesystem entries.

use std::path::Path;

/// A resolved filesystem node under the gallery root.
///
/// Both paths are stored as strings with forward-slash separators so
/// URL construction and ordering behave identically on every platform.
/// Entries are transient values built fresh on each lookup; only
/// derived artifacts are ever cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path on the host filesystem.
    pub full_path: String,

    /// Path relative to the gallery root. Empty for the root itself.
    pub sub_path: String,

    /// Whether the node is a directory.
    pub is_dir: bool,
}

impl Entry {
    /// Build an entry from host paths, normalizing separators.
    pub fn new(full_path: &Path, sub_path: &Path, is_dir: bool) -> Self {
        Self {
            full_path: to_slash(full_path),
            sub_path: to_slash(sub_path),
            is_dir,
        }
    }

    /// The final component of the subpath ("" for the root entry).
    pub fn file_name(&self) -> &str {
        self.sub_path.rsplit('/').next().unwrap_or("")
    }
}

/// Render a host path with forward-slash separators.
pub(crate) fn to_slash(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        raw.into_owned()
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
