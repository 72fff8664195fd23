//! The transcoder seam for alternate-format artifacts.
//!
//! The artifact cache never knows how an alternate encoding is
//! produced; it hands a source and destination path to an injected
//! [`Transcoder`] and persists whatever comes back. The shipped
//! variants are an external-process encoder (`cwebp` by default) and a
//! passthrough that declines every request, for deployments without
//! the external tool.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Default quality parameter handed to the external encoder.
pub const DEFAULT_WEBP_QUALITY: u8 = 50;

/// Outcome of a transcode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// The destination file was written.
    Written,

    /// The transcoder declined; the caller serves the original.
    Skipped,
}

/// Errors from a transcoder implementation.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The external program could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external program ran but reported failure.
    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Converts a source image into an alternate display format.
///
/// Implementations are injected into the artifact cache at
/// construction and invoked only when the destination artifact does
/// not already exist. They must be thread-safe; the cache calls them
/// from blocking worker threads.
pub trait Transcoder: Send + Sync {
    /// Produce `dest` from `source`, or report [`TranscodeOutcome::Skipped`]
    /// to make the caller serve the original file.
    fn transcode(&self, source: &Path, dest: &Path) -> Result<TranscodeOutcome, TranscodeError>;

    /// File extension of the produced format, without the leading dot.
    fn target_extension(&self) -> &str;
}

/// Transcoder that shells out to an external encoder such as `cwebp`.
///
/// The default invocation is `<program> -q <quality> <source> -o
/// <dest>`. Deployments can replace the leading flags wholesale with
/// [`CommandTranscoder::with_override_flags`]; the source and `-o
/// <dest>` tail is always appended. All configuration is explicit
/// per-instance state, never process-wide.
#[derive(Debug, Clone)]
pub struct CommandTranscoder {
    program: PathBuf,
    quality: u8,
    override_flags: Vec<String>,
    target_extension: String,
}

impl CommandTranscoder {
    /// Create a transcoder running `program` with default quality.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            quality: DEFAULT_WEBP_QUALITY,
            override_flags: Vec::new(),
            target_extension: "webp".to_string(),
        }
    }

    /// Set the quality passed as `-q <quality>`.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Replace the default `-q <quality>` flags entirely.
    pub fn with_override_flags(mut self, flags: Vec<String>) -> Self {
        self.override_flags = flags;
        self
    }

    /// Set the extension of the produced format (default `webp`).
    pub fn with_target_extension(mut self, extension: impl Into<String>) -> Self {
        self.target_extension = extension.into();
        self
    }

    fn build_args(&self, source: &Path, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if self.override_flags.is_empty() {
            args.push("-q".into());
            args.push(self.quality.to_string().into());
        } else {
            args.extend(self.override_flags.iter().map(OsString::from));
        }
        args.push(source.as_os_str().to_os_string());
        args.push("-o".into());
        args.push(dest.as_os_str().to_os_string());
        args
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Transcoder for CommandTranscoder {
    fn transcode(&self, source: &Path, dest: &Path) -> Result<TranscodeOutcome, TranscodeError> {
        let output = Command::new(&self.program)
            .args(self.build_args(source, dest))
            .output()
            .map_err(|source| TranscodeError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscodeError::CommandFailed {
                program: self.program_name(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(TranscodeOutcome::Written)
    }

    fn target_extension(&self) -> &str {
        &self.target_extension
    }
}

/// Transcoder that never produces anything.
///
/// Resolving an alternate-format artifact through this variant always
/// falls back to the original file. Used when no external encoder is
/// deployed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranscoder;

impl Transcoder for PassthroughTranscoder {
    fn transcode(&self, _source: &Path, _dest: &Path) -> Result<TranscodeOutcome, TranscodeError> {
        Ok(TranscodeOutcome::Skipped)
    }

    fn target_extension(&self) -> &str {
        "webp"
    }
}
