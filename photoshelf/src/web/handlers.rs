//! Request handlers.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::{error, warn};

use crate::listing::{build_listing, is_image_name, ListingItem};
use crate::vfs::{Entry, VfsError};

use super::pages;
use super::state::SharedState;
use super::urls;

/// Liveness probe.
pub(super) async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

pub(super) async fn index() -> Redirect {
    Redirect::to("/fs")
}

// ==============================================================
// Folder views
// ==============================================================

pub(super) async fn gallery_root(State(state): State<SharedState>) -> Response {
    gallery_response(state, String::new()).await
}

pub(super) async fn gallery_page(
    State(state): State<SharedState>,
    UrlPath(subpath): UrlPath<String>,
) -> Response {
    gallery_response(state, subpath).await
}

async fn gallery_response(state: SharedState, subpath: String) -> Response {
    let current = subpath.trim_matches('/').to_string();
    let items = blocking_listing(&state, current.clone()).await;
    let parent = parent_subpath(&current);
    pages::gallery(&current, parent.as_deref(), &items, &state.cache_buster).into_response()
}

/// Parent subpath for the "up" link, `None` at the gallery root.
fn parent_subpath(subpath: &str) -> Option<String> {
    if subpath.is_empty() {
        return None;
    }
    Some(
        subpath
            .rsplit_once('/')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_default(),
    )
}

// ==============================================================
// Listing API
// ==============================================================

/// Wire form of a listing entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingEntry {
    is_directory: bool,
    image_url: Option<String>,
    label: String,
    sub_path: String,
    file_name: String,
    subdirectory_count: usize,
}

impl ListingEntry {
    fn from_item(item: ListingItem, buster: &str) -> Self {
        let image_url = if item.is_directory {
            item.representative_image
                .as_deref()
                .map(|preview| urls::thumbnail_url(preview, buster))
        } else if is_image_name(&item.file_name) {
            Some(urls::file_url(&item.sub_path, buster))
        } else {
            None
        };
        Self {
            is_directory: item.is_directory,
            image_url,
            label: item.label,
            sub_path: item.sub_path,
            file_name: item.file_name,
            subdirectory_count: item.subdirectory_count,
        }
    }
}

pub(super) async fn listing_root(State(state): State<SharedState>) -> Json<Vec<ListingEntry>> {
    listing_response(state, String::new()).await
}

pub(super) async fn listing_page(
    State(state): State<SharedState>,
    UrlPath(subpath): UrlPath<String>,
) -> Json<Vec<ListingEntry>> {
    listing_response(state, subpath).await
}

async fn listing_response(state: SharedState, subpath: String) -> Json<Vec<ListingEntry>> {
    let entries = blocking_listing(&state, subpath)
        .await
        .into_iter()
        .map(|item| ListingEntry::from_item(item, &state.cache_buster))
        .collect();
    Json(entries)
}

/// Listing construction walks directories, so it runs on a blocking
/// worker rather than the request task.
async fn blocking_listing(state: &SharedState, subpath: String) -> Vec<ListingItem> {
    let vfs = state.vfs.clone();
    match tokio::task::spawn_blocking(move || build_listing(&vfs, &subpath)).await {
        Ok(items) => items,
        Err(task_error) => {
            error!(%task_error, "listing task failed");
            Vec::new()
        }
    }
}

// ==============================================================
// File and artifact bodies
// ==============================================================

pub(super) async fn serve_file(
    State(state): State<SharedState>,
    UrlPath(subpath): UrlPath<String>,
) -> Response {
    let entry = match resolve_file(&state, &subpath).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };
    stream_file(Path::new(&entry.full_path), None).await
}

#[derive(Clone, Copy)]
enum ArtifactKind {
    Thumbnail,
    Webp,
}

pub(super) async fn serve_thumbnail(
    State(state): State<SharedState>,
    UrlPath(subpath): UrlPath<String>,
) -> Response {
    serve_artifact(state, subpath, ArtifactKind::Thumbnail).await
}

pub(super) async fn serve_webp(
    State(state): State<SharedState>,
    UrlPath(subpath): UrlPath<String>,
) -> Response {
    serve_artifact(state, subpath, ArtifactKind::Webp).await
}

async fn serve_artifact(state: SharedState, subpath: String, kind: ArtifactKind) -> Response {
    let entry = match resolve_file(&state, &subpath).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    let source = PathBuf::from(&entry.full_path);
    let resolved = match kind {
        ArtifactKind::Thumbnail => {
            state
                .artifacts
                .resolve_thumbnail(&source, &entry.sub_path)
                .await
        }
        ArtifactKind::Webp => state.artifacts.resolve_webp(&source, &entry.sub_path).await,
    };

    match resolved {
        Ok(artifact) => {
            // Cached artifacts have a fixed encoding; originals keep
            // whatever type their name suggests.
            let content_type = match (kind, artifact.is_cached()) {
                (ArtifactKind::Thumbnail, true) => Some("image/jpeg"),
                (ArtifactKind::Webp, true) => Some("image/webp"),
                (_, false) => None,
            };
            stream_file(artifact.path(), content_type).await
        }
        Err(error) => {
            warn!(
                path = %source.display(),
                %error,
                "artifact generation failed, serving original"
            );
            stream_file(&source, None).await
        }
    }
}

/// Resolve a request subpath to a file entry, mapping resolution
/// failures to their response.
///
/// Resolution stats and canonicalizes, so it runs on a blocking
/// worker like the listing path does.
async fn resolve_file(state: &SharedState, subpath: &str) -> Result<Entry, Response> {
    let vfs = state.vfs.clone();
    let subpath = subpath.to_string();
    let resolved = match tokio::task::spawn_blocking(move || vfs.resolve(&subpath)).await {
        Ok(resolved) => resolved,
        Err(task_error) => {
            error!(%task_error, "path resolution task failed");
            return Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not process path",
            ));
        }
    };

    let entry = resolved.map_err(|error| vfs_error_response(&error))?;
    if entry.is_dir {
        return Err(error_response(StatusCode::BAD_REQUEST, "not a file"));
    }
    Ok(entry)
}

fn vfs_error_response(error: &VfsError) -> Response {
    match error {
        // Escapes report the same as missing paths.
        VfsError::NotFound { .. } | VfsError::OutsideRoot { .. } => {
            error_response(StatusCode::NOT_FOUND, "not found")
        }
        other => {
            error!(error = %other, "path resolution failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not process path")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, pages::error(status, message)).into_response()
}

/// Stream a file body in chunks with content type and length headers.
async fn stream_file(path: &Path, content_type: Option<&'static str>) -> Response {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(error) => {
            error!(path = %path.display(), %error, "failed to open file for streaming");
            return error_response(StatusCode::NOT_FOUND, "file not available");
        }
    };

    let mut headers = HeaderMap::new();
    let mime = match content_type {
        Some(fixed) => HeaderValue::from_static(fixed),
        None => {
            let guessed = mime_guess::from_path(path).first_or_octet_stream();
            HeaderValue::from_str(guessed.as_ref())
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
        }
    };
    headers.insert(header::CONTENT_TYPE, mime);

    if let Ok(metadata) = file.metadata().await {
        if let Ok(length) = HeaderValue::from_str(&metadata.len().to_string()) {
            headers.insert(header::CONTENT_LENGTH, length);
        }
    }

    let stream = ReaderStream::with_capacity(file, 1 << 18); // 256 KiB chunks
    (StatusCode::OK, headers, Body::from_stream(stream)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(is_directory: bool, sub_path: &str, representative: Option<&str>) -> ListingItem {
        ListingItem {
            is_directory,
            representative_image: representative.map(str::to_string),
            label: sub_path.to_string(),
            sub_path: sub_path.to_string(),
            file_name: sub_path.rsplit('/').next().unwrap_or("").to_string(),
            subdirectory_count: 0,
        }
    }

    #[test]
    fn test_image_file_entry_links_to_file_route() {
        let entry = ListingEntry::from_item(item(false, "album/1.jpg", None), "b1");
        assert_eq!(entry.image_url.as_deref(), Some("/file/album/1.jpg?v=b1"));
        assert_eq!(entry.sub_path, "album/1.jpg");
        assert_eq!(entry.file_name, "1.jpg");
    }

    #[test]
    fn test_directory_entry_links_to_preview_thumbnail() {
        let entry = ListingEntry::from_item(item(true, "album", Some("album/deep/pic.png")), "b1");
        assert_eq!(
            entry.image_url.as_deref(),
            Some("/thumbnail/album/deep/pic.png?v=b1")
        );
    }

    #[test]
    fn test_imageless_entries_have_no_url() {
        let dir = ListingEntry::from_item(item(true, "empty", None), "b1");
        assert_eq!(dir.image_url, None);

        let text = ListingEntry::from_item(item(false, "notes.txt", None), "b1");
        assert_eq!(text.image_url, None);
    }

    #[test]
    fn test_listing_entry_serializes_camel_case() {
        let entry = ListingEntry::from_item(item(false, "album/1.jpg", None), "b1");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["isDirectory"], false);
        assert_eq!(json["imageUrl"], "/file/album/1.jpg?v=b1");
        assert_eq!(json["subPath"], "album/1.jpg");
        assert_eq!(json["fileName"], "1.jpg");
        assert_eq!(json["subdirectoryCount"], 0);
        assert_eq!(json["label"], "album/1.jpg");
    }

    #[test]
    fn test_parent_subpath_walks_up_to_root() {
        assert_eq!(parent_subpath("album/inner"), Some("album".to_string()));
        assert_eq!(parent_subpath("album"), Some(String::new()));
        assert_eq!(parent_subpath(""), None);
    }
}
