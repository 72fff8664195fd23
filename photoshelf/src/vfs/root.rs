//! The gallery root and subpath resolution.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::entry::Entry;
use super::error::{VfsError, VfsResult};

/// The fixed base directory the gallery serves.
///
/// The root is canonicalized once at construction; every resolved
/// subpath is asserted to stay under it, so request paths can never
/// reach outside the served tree even through `..` segments or
/// symlinks.
#[derive(Debug, Clone)]
pub struct VfsRoot {
    root: PathBuf,
}

impl VfsRoot {
    /// Open a gallery root.
    ///
    /// The path must exist and be a directory; anything else fails
    /// construction so a misconfigured server never starts serving an
    /// empty or wrong tree.
    pub fn open(path: impl AsRef<Path>) -> VfsResult<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                VfsError::RootNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                VfsError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(VfsError::RootNotDirectory {
                path: path.to_path_buf(),
            });
        }

        let root = path.canonicalize().map_err(|source| VfsError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { root })
    }

    /// The canonicalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a subpath onto the root without touching the filesystem.
    ///
    /// `..` and `.` segments are normalized away lexically (clamped at
    /// the root), so the returned path always lies under the root. Use
    /// [`VfsRoot::resolve`] when existence matters.
    pub fn full_path(&self, subpath: &str) -> PathBuf {
        self.root.join(normalize_subpath(subpath))
    }

    /// Resolve a subpath to an [`Entry`], checking containment.
    ///
    /// Fails closed: stat errors, missing nodes, and paths that escape
    /// the root (via symlinks) all return a [`VfsError`] rather than
    /// panicking or leaking filesystem structure.
    pub fn resolve(&self, subpath: &str) -> VfsResult<Entry> {
        let full = self.full_path(subpath);

        let canonical = match full.canonicalize() {
            Ok(canonical) => canonical,
            Err(source) => {
                let err = VfsError::from_io(full, source);
                debug!(subpath, error = %err, "subpath did not resolve");
                return Err(err);
            }
        };

        if !canonical.starts_with(&self.root) {
            warn!(
                subpath,
                resolved = %canonical.display(),
                root = %self.root.display(),
                "resolved path escapes the gallery root"
            );
            return Err(VfsError::OutsideRoot { path: canonical });
        }

        let metadata = match fs::metadata(&canonical) {
            Ok(metadata) => metadata,
            Err(source) => {
                let err = VfsError::from_io(canonical, source);
                debug!(subpath, error = %err, "stat failed after resolution");
                return Err(err);
            }
        };

        Ok(Entry::new(
            &canonical,
            &normalize_subpath(subpath),
            metadata.is_dir(),
        ))
    }
}

/// Lexically normalize a subpath into a relative path.
///
/// `.` segments, root markers, and drive prefixes are dropped; `..`
/// pops the previous segment and clamps at the top, so the result can
/// never climb above whatever it is joined onto.
pub(crate) fn normalize_subpath(subpath: &str) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in Path::new(subpath).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    normalized
}
