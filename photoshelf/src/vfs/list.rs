//! Directory listing.

use std::fs;
use std::path::Path;

use tracing::warn;

use super::entry::{to_slash, Entry};
use super::root::VfsRoot;

impl VfsRoot {
    /// List the immediate children of a subpath.
    ///
    /// The same call renders both "a folder" and "a single file" views:
    /// a directory yields its children, a file yields a single-element
    /// vec containing itself, and anything missing or unreadable yields
    /// an empty vec. Children are returned in byte-wise name order so
    /// downstream ordering and BFS tie-breaks are deterministic.
    pub fn list_children(&self, subpath: &str) -> Vec<Entry> {
        let parent = match self.resolve(subpath) {
            Ok(entry) => entry,
            // Listing a missing folder is "nothing here", not an error.
            Err(_) => return Vec::new(),
        };

        if !parent.is_dir {
            return vec![parent];
        }

        let dir_path = Path::new(&parent.full_path).to_path_buf();
        let reader = match fs::read_dir(&dir_path) {
            Ok(reader) => reader,
            Err(error) => {
                warn!(
                    path = %dir_path.display(),
                    %error,
                    "directory read failed, listing degrades to empty"
                );
                return Vec::new();
            }
        };

        let mut children = Vec::new();
        for dirent in reader {
            let dirent = match dirent {
                Ok(dirent) => dirent,
                Err(error) => {
                    warn!(path = %dir_path.display(), %error, "skipping unreadable entry");
                    continue;
                }
            };

            let name = match dirent.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(path = %dir_path.display(), name = ?raw, "skipping non-UTF-8 entry name");
                    continue;
                }
            };

            let is_dir = dirent
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);

            let sub_path = if parent.sub_path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", parent.sub_path, name)
            };

            children.push(Entry {
                full_path: to_slash(&dir_path.join(&name)),
                sub_path,
                is_dir,
            });
        }

        children.sort_by(|a, b| a.file_name().cmp(b.file_name()));
        children
    }

    /// Whether a subpath resolves to an existing node under the root.
    pub fn exists(&self, subpath: &str) -> bool {
        self.resolve(subpath).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gallery_with(paths: &[&str]) -> (TempDir, VfsRoot) {
        let temp = TempDir::new().unwrap();
        for path in paths {
            let full = temp.path().join(path);
            if path.ends_with('/') {
                fs::create_dir_all(&full).unwrap();
            } else {
                fs::create_dir_all(full.parent().unwrap()).unwrap();
                fs::write(&full, b"x").unwrap();
            }
        }
        let root = VfsRoot::open(temp.path()).unwrap();
        (temp, root)
    }

    #[test]
    fn test_missing_subpath_lists_empty() {
        let (_temp, root) = gallery_with(&[]);
        assert!(root.list_children("missing").is_empty());
    }

    #[test]
    fn test_traversal_subpath_lists_empty() {
        let (_temp, root) = gallery_with(&[]);
        assert!(root.list_children("../../etc").is_empty());
    }

    #[test]
    fn test_file_subpath_lists_itself() {
        let (_temp, root) = gallery_with(&["album/1.jpg"]);
        let children = root.list_children("album/1.jpg");
        assert_eq!(children.len(), 1);
        assert!(!children[0].is_dir);
        assert_eq!(children[0].sub_path, "album/1.jpg");
    }

    #[test]
    fn test_directory_lists_children_in_name_order() {
        let (_temp, root) = gallery_with(&["album/c.jpg", "album/a.jpg", "album/b/"]);
        let children = root.list_children("album");
        let names: Vec<String> = children.iter().map(|e| e.file_name().to_string()).collect();
        assert_eq!(names, vec!["a.jpg", "b", "c.jpg"]);
        assert!(children[1].is_dir);
    }

    #[test]
    fn test_children_of_root_use_bare_subpaths() {
        let (_temp, root) = gallery_with(&["top.jpg"]);
        let children = root.list_children("");
        assert_eq!(children[0].sub_path, "top.jpg");
    }

    #[test]
    fn test_nested_children_have_relative_subpaths() {
        let (_temp, root) = gallery_with(&["a/b/c.jpg"]);
        let children = root.list_children("a/b");
        assert_eq!(children[0].sub_path, "a/b/c.jpg");
    }

    #[test]
    fn test_exists_reports_presence() {
        let (_temp, root) = gallery_with(&["album/1.jpg"]);
        assert!(root.exists("album/1.jpg"));
        assert!(root.exists(""));
        assert!(!root.exists("album/2.jpg"));
    }
}
