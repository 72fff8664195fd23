//! Lazy on-disk cache of display-ready image artifacts.
//!
//! The gallery never serves a full-size image twice when a smaller
//! derived version will do. On first request for a thumbnail (or an
//! alternate encoding such as WebP), the [`ArtifactCache`] materializes
//! the derived file under a hidden directory mirroring the source tree
//! and serves it from disk on every later request. Existence of the
//! cache file is the only validity signal: artifacts never expire and
//! are never revalidated against the source.
//!
//! Generation is single-flight per artifact file and bounded by a
//! semaphore; writes are temp-file + atomic rename so a reader can
//! never observe a partial artifact. Every failure path is recoverable:
//! callers fall back to serving the original file.

mod cache;
mod error;
mod resize;
mod transcoder;

pub use cache::{
    Artifact, ArtifactCache, CACHE_DIR_NAME, DEFAULT_MAX_CONCURRENT_GENERATIONS,
    DEFAULT_THUMBNAIL_WIDTH,
};
pub use error::{ArtifactError, ArtifactResult};
pub use transcoder::{
    CommandTranscoder, PassthroughTranscoder, TranscodeError, TranscodeOutcome, Transcoder,
    DEFAULT_WEBP_QUALITY,
};
