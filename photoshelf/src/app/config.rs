//! Application configuration for PhotoshelfApp.
//!
//! This module defines `AppConfig`, the resolved runtime configuration
//! passed to `PhotoshelfApp::start()`. It is assembled from built-in
//! defaults, the optional configuration file, and command line flags, in
//! that order of precedence.

use std::path::PathBuf;

use crate::artifact::{DEFAULT_THUMBNAIL_WIDTH, DEFAULT_WEBP_QUALITY};
use crate::config::{ConfigFile, DEFAULT_PORT, DEFAULT_WEBP_PROGRAM};

/// Application configuration for the gallery server.
///
/// This is the top-level configuration passed to `PhotoshelfApp::start()`.
/// Fields are public so callers can overlay command line flags directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory served as the gallery root.
    pub root: PathBuf,

    /// TCP port for the HTTP server. Port 0 binds an ephemeral port.
    pub port: u16,

    /// Target width in pixels for generated thumbnails.
    pub thumbnail_width: u32,

    /// WebP transcoder configuration.
    pub webp: WebpSettings,
}

/// WebP transcoder configuration for the application.
#[derive(Clone, Debug)]
pub struct WebpSettings {
    /// Whether WebP variants are generated at all. When disabled, WebP
    /// requests fall back to the original file.
    pub enabled: bool,

    /// External encoder binary, resolved via `PATH` when not absolute.
    pub program: String,

    /// Encoder quality (0-100), used when no override flags are given.
    pub quality: u8,

    /// Flags replacing the default quality arguments. Source and
    /// destination arguments are appended either way.
    pub override_flags: Vec<String>,
}

impl Default for WebpSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_WEBP_PROGRAM.to_string(),
            quality: DEFAULT_WEBP_QUALITY,
            override_flags: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            port: DEFAULT_PORT,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            webp: WebpSettings::default(),
        }
    }
}

impl AppConfig {
    /// Create a config serving the given directory, with defaults elsewhere.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Create application config from a loaded configuration file.
    ///
    /// This factory keeps the file-to-runtime translation in one place
    /// rather than scattered in CLI code.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            root: config.gallery.root.clone(),
            port: config.server.port,
            thumbnail_width: config.gallery.thumbnail_width,
            webp: WebpSettings {
                enabled: config.webp.enabled,
                program: config.webp.program.clone(),
                quality: config.webp.quality,
                override_flags: config.webp.flags.clone(),
            },
        }
    }

    /// Set the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the thumbnail target width.
    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width;
        self
    }

    /// Replace the WebP settings.
    pub fn with_webp(mut self, webp: WebpSettings) -> Self {
        self.webp = webp;
        self
    }
}

impl WebpSettings {
    /// Settings with WebP generation turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the encoder quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Replace the default quality flags.
    pub fn with_override_flags(mut self, flags: Vec<String>) -> Self {
        self.override_flags = flags;
        self
    }
}
