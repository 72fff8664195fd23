//! URL construction for pages and the JSON API.

/// Percent-encode a subpath segment by segment, keeping the slashes.
pub(super) fn encode_subpath(subpath: &str) -> String {
    subpath
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Folder view URL for a subpath.
pub(super) fn page_url(subpath: &str) -> String {
    if subpath.is_empty() {
        "/fs".to_string()
    } else {
        format!("/fs/{}", encode_subpath(subpath))
    }
}

/// Original-file URL with the cache buster attached.
pub(super) fn file_url(subpath: &str, buster: &str) -> String {
    format!("/file/{}?v={buster}", encode_subpath(subpath))
}

/// Thumbnail URL with the cache buster attached.
pub(super) fn thumbnail_url(subpath: &str, buster: &str) -> String {
    format!("/thumbnail/{}?v={buster}", encode_subpath(subpath))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_slashes_and_escapes_segments() {
        assert_eq!(encode_subpath("album/1.jpg"), "album/1.jpg");
        assert_eq!(
            encode_subpath("my album/pic #1.jpg"),
            "my%20album/pic%20%231.jpg"
        );
        assert_eq!(encode_subpath("a?b/c&d"), "a%3Fb/c%26d");
    }

    #[test]
    fn test_page_url_root_has_no_trailing_slash() {
        assert_eq!(page_url(""), "/fs");
        assert_eq!(page_url("album"), "/fs/album");
        assert_eq!(page_url("album/inner"), "/fs/album/inner");
    }

    #[test]
    fn test_image_urls_carry_the_buster() {
        assert_eq!(file_url("a.jpg", "abc123"), "/file/a.jpg?v=abc123");
        assert_eq!(
            thumbnail_url("album/a.jpg", "abc123"),
            "/thumbnail/album/a.jpg?v=abc123"
        );
    }
}
