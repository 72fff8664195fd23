//! Presentation-facing directory listings.
//!
//! A [`ListingItem`] is what the web layer renders: one row per child
//! of the requested folder, enriched for directories with a
//! representative preview image (breadth-first search) and a shallow
//! subdirectory count, sorted in natural display order.

use crate::artifact::CACHE_DIR_NAME;
use crate::order::natural_cmp;
use crate::vfs::VfsRoot;

/// File extensions recognized as images, matched case-insensitively
/// against the end of the file name.
pub const IMAGE_EXTENSIONS: [&str; 10] = [
    ".jpeg", ".jpg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".webp", ".svg", ".ico",
];

/// Whether a file name carries a recognized image extension.
pub fn is_image_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// One child of a listed folder, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    /// Whether the child is a directory.
    pub is_directory: bool,

    /// Subpath of the preview image chosen for a directory, if any.
    pub representative_image: Option<String>,

    /// Display label (the subpath, matching what the gallery shows).
    pub label: String,

    /// Subpath of the child itself.
    pub sub_path: String,

    /// Final path component, the sort key for natural ordering.
    pub file_name: String,

    /// Number of immediate subdirectories (0 for files).
    pub subdirectory_count: usize,
}

/// Build the sorted listing for a folder view.
///
/// Missing subpaths produce an empty listing; a file subpath produces
/// a single-item listing of that file. The artifact cache directory is
/// excluded so the gallery never previews its own derived files.
pub fn build_listing(vfs: &VfsRoot, subpath: &str) -> Vec<ListingItem> {
    let mut items = Vec::new();

    for entry in vfs.list_children(subpath) {
        if entry.is_dir && entry.file_name() == CACHE_DIR_NAME {
            continue;
        }

        let item = if entry.is_dir {
            let representative = vfs
                .find_first(&entry.sub_path, is_image_name)
                .map(|found| found.sub_path);
            let subdirectory_count = vfs
                .list_children(&entry.sub_path)
                .iter()
                .filter(|child| child.is_dir)
                .count();
            ListingItem {
                is_directory: true,
                representative_image: representative,
                label: entry.sub_path.clone(),
                file_name: entry.file_name().to_string(),
                sub_path: entry.sub_path,
                subdirectory_count,
            }
        } else {
            ListingItem {
                is_directory: false,
                representative_image: None,
                label: entry.sub_path.clone(),
                file_name: entry.file_name().to_string(),
                sub_path: entry.sub_path,
                subdirectory_count: 0,
            }
        };

        items.push(item);
    }

    items.sort_by(|a, b| natural_cmp(&a.file_name, &b.file_name));
    items
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

    // ==========================================================
    // Image name predicate
    // ==========================================================

    #[test]
    fn test_recognizes_every_image_extension() {
        for ext in IMAGE_EXTENSIONS {
            let name = format!("photo{ext}");
            assert!(is_image_name(&name), "{name} should be an image");
        }
    }

    #[test]
    fn test_image_extension_match_is_case_insensitive() {
        assert!(is_image_name("PHOTO.JPG"));
        assert!(is_image_name("photo.WebP"));
    }

    #[test]
    fn test_non_images_are_rejected() {
        assert!(!is_image_name("notes.txt"));
        assert!(!is_image_name("jpg"));
        assert!(!is_image_name("archive.png.gz"));
    }

    // ==========================================================
    // Listing assembly
    // ==========================================================

    #[test]
    fn test_missing_folder_lists_empty() {
        let (_temp, root) = gallery_with(&[]);
        assert!(build_listing(&root, "nowhere").is_empty());
    }

    #[test]
    fn test_file_subpath_lists_single_item() {
        let (_temp, root) = gallery_with(&["album/1.jpg"]);
        let items = build_listing(&root, "album/1.jpg");
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_directory);
        assert_eq!(items[0].sub_path, "album/1.jpg");
        assert_eq!(items[0].file_name, "1.jpg");
        assert_eq!(items[0].subdirectory_count, 0);
    }

    #[test]
    fn test_directory_items_carry_preview_and_counts() {
        let (_temp, root) = gallery_with(&[
            "album/inner/deep/pic.png",
            "album/inner/more/",
            "album/empty/",
        ]);
        let items = build_listing(&root, "album");

        let inner = items.iter().find(|i| i.file_name == "inner").unwrap();
        assert!(inner.is_directory);
        assert_eq!(inner.representative_image.as_deref(), Some("album/inner/deep/pic.png"));
        assert_eq!(inner.subdirectory_count, 2);

        let empty = items.iter().find(|i| i.file_name == "empty").unwrap();
        assert_eq!(empty.representative_image, None);
        assert_eq!(empty.subdirectory_count, 0);
    }

    #[test]
    fn test_listing_sorts_in_natural_order() {
        let (_temp, root) = gallery_with(&["album/10.png", "album/2.png", "album/apple.png"]);
        let items = build_listing(&root, "album");
        let names: Vec<&str> = items.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["2.png", "10.png", "apple.png"]);
    }

    #[test]
    fn test_cache_directory_is_hidden_from_listings() {
        let cached = format!("{CACHE_DIR_NAME}/album/1.jpg");
        let (_temp, root) = gallery_with(&[cached.as_str(), "album/1.jpg"]);
        let items = build_listing(&root, "");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].file_name, "album");
    }

    #[test]
    fn test_label_matches_subpath() {
        let (_temp, root) = gallery_with(&["album/sub/"]);
        let items = build_listing(&root, "album");
        assert_eq!(items[0].label, "album/sub");
    }
}
