//! Lazy, persistent artifact generation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info};

use crate::listing::is_image_name;
use crate::vfs::normalize_subpath;

use super::error::{ArtifactError, ArtifactResult};
use super::resize;
use super::transcoder::{TranscodeOutcome, Transcoder};

/// Name of the hidden cache directory inside the gallery root.
pub const CACHE_DIR_NAME: &str = ".thumbnail";

/// Default width of generated thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 200;

/// Default bound on artifact generations running at once.
pub const DEFAULT_MAX_CONCURRENT_GENERATIONS: usize = 4;

/// File resolved by the cache for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// The untouched source file; no artifact was generated for it.
    Original(PathBuf),

    /// A generated file inside the cache directory.
    Cached(PathBuf),
}

impl Artifact {
    /// Path of the file to serve.
    pub fn path(&self) -> &Path {
        match self {
            Self::Original(path) | Self::Cached(path) => path,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// Generates and stores derived image artifacts under the gallery's
/// hidden cache directory.
///
/// An artifact that exists on disk is final: it is served as-is on
/// every later request and never compared against its source again.
/// Generation of a given artifact file runs at most once at a time,
/// concurrent requests for the same file wait for the first to finish,
/// and the total number of in-flight generations is bounded.
pub struct ArtifactCache {
    cache_dir: PathBuf,
    thumbnail_width: u32,
    transcoder: Arc<dyn Transcoder>,
    generation_locks: DashMap<PathBuf, Arc<Mutex<()>>>,
    generation_permits: Semaphore,
}

impl ArtifactCache {
    /// Create a cache rooted at `<root>/.thumbnail`.
    pub fn new(root: &Path, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            cache_dir: root.join(CACHE_DIR_NAME),
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            transcoder,
            generation_locks: DashMap::new(),
            generation_permits: Semaphore::new(DEFAULT_MAX_CONCURRENT_GENERATIONS),
        }
    }

    /// Set the width of generated thumbnails.
    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width;
        self
    }

    /// Set the bound on artifact generations running at once.
    pub fn with_max_concurrent_generations(mut self, limit: usize) -> Self {
        self.generation_permits = Semaphore::new(limit);
        self
    }

    /// Directory that holds all generated artifacts.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location for the thumbnail of `cache_key`.
    ///
    /// The key is normalized the same way gallery subpaths are, so a
    /// hostile key cannot place an artifact outside the cache
    /// directory.
    pub fn thumbnail_path(&self, cache_key: &str) -> PathBuf {
        self.cache_dir.join(normalize_subpath(cache_key))
    }

    /// Cache location for the transcoded variant of `cache_key`.
    pub fn transcoded_path(&self, cache_key: &str) -> PathBuf {
        self.thumbnail_path(cache_key)
            .with_extension(self.transcoder.target_extension())
    }

    /// Resolve the thumbnail for `source`, generating it on first use.
    ///
    /// Sources no wider than the thumbnail width are served directly
    /// without copying them into the cache.
    pub async fn resolve_thumbnail(
        &self,
        source: &Path,
        cache_key: &str,
    ) -> ArtifactResult<Artifact> {
        let cache_path = self.thumbnail_path(cache_key);
        if file_exists(&cache_path).await {
            return Ok(Artifact::Cached(cache_path));
        }

        let lock = self.generation_lock(&cache_path);
        let _guard = lock.lock().await;

        // Another request may have finished the work while we waited.
        if file_exists(&cache_path).await {
            return Ok(Artifact::Cached(cache_path));
        }

        let probe_source = source.to_path_buf();
        let source_width = run_blocking(move || resize::probe_width(&probe_source)).await?;
        if source_width <= self.thumbnail_width {
            debug!(
                source = %source.display(),
                width = source_width,
                "source no wider than thumbnail, serving original"
            );
            return Ok(Artifact::Original(source.to_path_buf()));
        }

        let _permit = self
            .generation_permits
            .acquire()
            .await
            .expect("generation semaphore closed");

        let render_source = source.to_path_buf();
        let target_width = self.thumbnail_width;
        let bytes =
            run_blocking(move || resize::render_thumbnail(&render_source, target_width)).await?;

        let target = cache_path.clone();
        run_blocking(move || write_artifact(&target, &bytes)).await?;

        info!(key = cache_key, cache = %cache_path.display(), "thumbnail generated");
        Ok(Artifact::Cached(cache_path))
    }

    /// Resolve the transcoded variant for `source`, generating it on
    /// first use.
    ///
    /// Non-image keys and transcoder skips fall back to the original
    /// file.
    pub async fn resolve_webp(&self, source: &Path, cache_key: &str) -> ArtifactResult<Artifact> {
        if !is_image_name(cache_key) {
            return Ok(Artifact::Original(source.to_path_buf()));
        }

        let cache_path = self.transcoded_path(cache_key);
        if file_exists(&cache_path).await {
            return Ok(Artifact::Cached(cache_path));
        }

        let lock = self.generation_lock(&cache_path);
        let _guard = lock.lock().await;

        if file_exists(&cache_path).await {
            return Ok(Artifact::Cached(cache_path));
        }

        // The external encoder cannot create directories itself.
        if let Some(parent) = cache_path.parent() {
            let parent = parent.to_path_buf();
            run_blocking(move || {
                std::fs::create_dir_all(&parent).map_err(|source| ArtifactError::CreateDir {
                    path: parent.clone(),
                    source,
                })
            })
            .await?;
        }

        let _permit = self
            .generation_permits
            .acquire()
            .await
            .expect("generation semaphore closed");

        let transcoder = Arc::clone(&self.transcoder);
        let transcode_source = source.to_path_buf();
        let temp = temp_sibling(&cache_path);
        let temp_dest = temp.clone();
        let outcome = run_blocking(move || {
            transcoder
                .transcode(&transcode_source, &temp_dest)
                .map_err(|source| ArtifactError::Transcode {
                    source_path: transcode_source.clone(),
                    dest: temp_dest.clone(),
                    source,
                })
        })
        .await;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(error);
            }
        };

        match outcome {
            TranscodeOutcome::Written => {
                let rename_from = temp.clone();
                let rename_to = cache_path.clone();
                run_blocking(move || {
                    std::fs::rename(&rename_from, &rename_to).map_err(|source| {
                        let _ = std::fs::remove_file(&rename_from);
                        ArtifactError::Write {
                            path: rename_to.clone(),
                            source,
                        }
                    })
                })
                .await?;

                info!(key = cache_key, cache = %cache_path.display(), "artifact transcoded");
                Ok(Artifact::Cached(cache_path))
            }
            TranscodeOutcome::Skipped => {
                debug!(key = cache_key, "transcoder skipped, serving original");
                Ok(Artifact::Original(source.to_path_buf()))
            }
        }
    }

    /// Lock serializing writers of one artifact file.
    ///
    /// Keyed on the destination path rather than the request's cache
    /// key: the extension swap collapses distinct keys onto one
    /// artifact file (`a.jpg` and `a.png` both transcode to `a.webp`),
    /// and every writer of that file must take the same lock.
    fn generation_lock(&self, artifact_path: &Path) -> Arc<Mutex<()>> {
        self.generation_locks
            .entry(artifact_path.to_path_buf())
            .or_default()
            .clone()
    }
}

/// Run CPU- or IO-heavy work on a blocking worker thread.
async fn run_blocking<T, F>(work: F) -> ArtifactResult<T>
where
    F: FnOnce() -> ArtifactResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ArtifactError::Background(e.to_string()))?
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Write `bytes` to `target` through a sibling temp file so readers
/// never observe a partially written artifact.
fn write_artifact(target: &Path, bytes: &[u8]) -> ArtifactResult<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp = temp_sibling(target);
    std::fs::write(&temp, bytes).map_err(|source| ArtifactError::Write {
        path: temp.clone(),
        source,
    })?;

    if let Err(source) = std::fs::rename(&temp, target) {
        let _ = std::fs::remove_file(&temp);
        return Err(ArtifactError::Write {
            path: target.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Temp path next to `path`, appended to the full file name so
/// sibling artifacts never share a temp file. Writers of the same
/// artifact file are serialized by the per-path generation lock.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}
