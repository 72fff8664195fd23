//! Breadth-first search for representative files.

use std::collections::VecDeque;

use super::entry::Entry;
use super::root::VfsRoot;

impl VfsRoot {
    /// Find the first file under `subpath` whose name satisfies
    /// `predicate`, searching breadth-first.
    ///
    /// Each directory's files are tested in listing order before any
    /// queued subdirectory is descended into, so the match is always
    /// the shallowest candidate; ties at one depth go to the first in
    /// name order. The search stops at the first match. Unreadable
    /// directories are skipped, not fatal. A subpath that resolves to
    /// a file is returned as-is: the caller already decided the node
    /// deserves a preview.
    ///
    /// The queue is constructed fresh per call; no traversal state is
    /// shared between requests.
    pub fn find_first<P>(&self, subpath: &str, predicate: P) -> Option<Entry>
    where
        P: Fn(&str) -> bool,
    {
        let start = self.resolve(subpath).ok()?;
        if !start.is_dir {
            return Some(start);
        }

        let mut pending = VecDeque::new();
        pending.push_back(start);

        while let Some(dir) = pending.pop_front() {
            for child in self.list_children(&dir.sub_path) {
                if child.is_dir {
                    pending.push_back(child);
                } else if predicate(child.file_name()) {
                    return Some(child);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
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

    fn is_png(name: &str) -> bool {
        name.ends_with(".png")
    }

    #[test]
    fn test_find_prefers_shallow_match() {
        let (_temp, root) = gallery_with(&["d/deep/deeper/a.png", "d/b.png"]);
        let found = root.find_first("d", is_png).unwrap();
        assert_eq!(found.sub_path, "d/b.png");
    }

    #[test]
    fn test_find_checks_files_before_descending() {
        // "a" sorts before "z.png", but z.png sits at the shallower level.
        let (_temp, root) = gallery_with(&["d/a/inner.png", "d/z.png"]);
        let found = root.find_first("d", is_png).unwrap();
        assert_eq!(found.sub_path, "d/z.png");
    }

    #[test]
    fn test_find_tie_at_depth_goes_to_first_in_name_order() {
        let (_temp, root) = gallery_with(&["d/a/one.png", "d/b/two.png"]);
        let found = root.find_first("d", is_png).unwrap();
        assert_eq!(found.sub_path, "d/a/one.png");
    }

    #[test]
    fn test_find_skips_non_matching_files() {
        let (_temp, root) = gallery_with(&["d/notes.txt", "d/sub/pic.png"]);
        let found = root.find_first("d", is_png).unwrap();
        assert_eq!(found.sub_path, "d/sub/pic.png");
    }

    #[test]
    fn test_find_result_lies_under_start() {
        let (_temp, root) = gallery_with(&["d/x/y/pic.png", "other/elsewhere.png"]);
        let found = root.find_first("d", is_png).unwrap();
        assert!(found.sub_path.starts_with("d/"));
    }

    #[test]
    fn test_find_exhausted_subtree_is_none() {
        let (_temp, root) = gallery_with(&["d/notes.txt", "d/sub/more.txt"]);
        assert!(root.find_first("d", is_png).is_none());
    }

    #[test]
    fn test_find_missing_start_is_none() {
        let (_temp, root) = gallery_with(&[]);
        assert!(root.find_first("gone", is_png).is_none());
    }

    #[test]
    fn test_find_on_file_returns_the_file() {
        let (_temp, root) = gallery_with(&["d/readme.txt"]);
        let found = root.find_first("d/readme.txt", is_png).unwrap();
        assert_eq!(found.sub_path, "d/readme.txt");
    }
}
