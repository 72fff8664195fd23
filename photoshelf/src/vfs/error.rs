//! Error types for the filesystem view.

use std::io;
use std::path::PathBuf;

/// Result type for filesystem view operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors that can occur while resolving paths under the gallery root.
///
/// None of these are fatal to the serving process: callers treat every
/// variant as "nothing to serve here" and degrade accordingly.
#[derive(Debug)]
pub enum VfsError {
    /// The gallery root does not exist.
    RootNotFound { path: PathBuf },

    /// The gallery root exists but is not a directory.
    RootNotDirectory { path: PathBuf },

    /// The subpath does not resolve to an existing node.
    NotFound { path: PathBuf },

    /// The subpath resolved to a location outside the gallery root.
    OutsideRoot { path: PathBuf },

    /// Metadata or directory read failed for a reason other than absence.
    ReadFailed { path: PathBuf, source: io::Error },
}

impl VfsError {
    /// Map an I/O error from a stat/canonicalize call onto the taxonomy.
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::ReadFailed { path, source }
        }
    }
}

impl std::fmt::Display for VfsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "gallery root not found: {}", path.display())
            }
            Self::RootNotDirectory { path } => {
                write!(f, "gallery root is not a directory: {}", path.display())
            }
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::OutsideRoot { path } => {
                write!(f, "path resolves outside the gallery root: {}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_path() {
        let err = VfsError::NotFound {
            path: PathBuf::from("/photos/missing"),
        };
        assert_eq!(err.to_string(), "not found: /photos/missing");
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        match VfsError::from_io(PathBuf::from("/photos/x"), io_err) {
            VfsError::NotFound { path } => assert_eq!(path, PathBuf::from("/photos/x")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_io_permission_maps_to_read_failed() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = VfsError::from_io(PathBuf::from("/photos/x"), io_err);
        assert!(matches!(err, VfsError::ReadFailed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
