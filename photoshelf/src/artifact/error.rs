//! Error taxonomy for artifact generation.
//!
//! Every variant is recoverable: the web layer logs the error and
//! serves the original file instead. Nothing here may take down the
//! serving process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::transcoder::TranscodeError;

/// Result type for artifact cache operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors that can occur while resolving or generating an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The source file could not be decoded as an image.
    #[error("failed to decode {} as an image: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// Re-encoding the scaled image failed.
    #[error("failed to encode thumbnail for {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    /// The external transcoder failed or could not be launched.
    #[error("failed to transcode {} to {}: {source}", .source_path.display(), .dest.display())]
    Transcode {
        source_path: PathBuf,
        dest: PathBuf,
        #[source]
        source: TranscodeError,
    },

    /// A cache subdirectory could not be created.
    #[error("failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The artifact file could not be written or renamed into place.
    #[error("failed to write artifact {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A background generation task failed to complete.
    #[error("artifact generation task failed: {0}")]
    Background(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_display_names_the_source() {
        let err = ArtifactError::Decode {
            path: PathBuf::from("/photos/a.jpg"),
            reason: "bad magic bytes".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("/photos/a.jpg"));
        assert!(text.contains("bad magic bytes"));
    }

    #[test]
    fn test_write_error_chains_io_source() {
        let err = ArtifactError::Write {
            path: PathBuf::from("/photos/.thumbnail/a.jpg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
