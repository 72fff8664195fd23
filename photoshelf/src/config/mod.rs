//! Persistent configuration.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/photoshelf/config.ini` on Linux). A missing file means
//! all defaults; CLI flags override whatever the file provides.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use crate::artifact::{DEFAULT_THUMBNAIL_WIDTH, DEFAULT_WEBP_QUALITY};

mod error;

pub use error::ConfigError;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 61091;

/// Default external webp encoder program.
pub const DEFAULT_WEBP_PROGRAM: &str = "cwebp";

/// Platform location of the config file, `None` when the platform
/// exposes no config directory.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("photoshelf").join("config.ini"))
}

/// The parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub gallery: GallerySection,
    pub webp: WebpSection,
}

/// `[server]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSection {
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// `[gallery]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySection {
    /// Directory to serve.
    pub root: PathBuf,

    /// Width of generated thumbnails, in pixels.
    pub thumbnail_width: u32,
}

impl Default for GallerySection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
        }
    }
}

/// `[webp]` settings for the external transcoder.
#[derive(Debug, Clone, PartialEq)]
pub struct WebpSection {
    /// Whether `/webp` requests transcode at all.
    pub enabled: bool,

    /// Encoder program name or path.
    pub program: String,

    /// Quality passed as `-q <quality>`.
    pub quality: u8,

    /// Replacement flags; when non-empty they take the place of the
    /// default `-q <quality>` pair.
    pub flags: Vec<String>,
}

impl Default for WebpSection {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_WEBP_PROGRAM.to_string(),
            quality: DEFAULT_WEBP_QUALITY,
            flags: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Load from the default location; a missing file is all defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file is all defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(server) = ini.section(Some("server")) {
            if let Some(port) = server.get("port") {
                config.server.port = parse_value("server", "port", port)?;
            }
        }

        if let Some(gallery) = ini.section(Some("gallery")) {
            if let Some(root) = gallery.get("root") {
                config.gallery.root = PathBuf::from(root);
            }
            if let Some(width) = gallery.get("thumbnail_width") {
                config.gallery.thumbnail_width =
                    parse_value("gallery", "thumbnail_width", width)?;
            }
        }

        if let Some(webp) = ini.section(Some("webp")) {
            if let Some(enabled) = webp.get("enabled") {
                config.webp.enabled = parse_bool("webp", "enabled", enabled)?;
            }
            if let Some(program) = webp.get("program") {
                config.webp.program = program.to_string();
            }
            if let Some(quality) = webp.get("quality") {
                config.webp.quality = parse_value("webp", "quality", quality)?;
            }
            if let Some(flags) = webp.get("flags") {
                config.webp.flags = flags.split_whitespace().map(str::to_string).collect();
            }
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("server"))
            .set("port", self.server.port.to_string());
        ini.with_section(Some("gallery"))
            .set("root", self.gallery.root.display().to_string())
            .set("thumbnail_width", self.gallery.thumbnail_width.to_string());
        ini.with_section(Some("webp"))
            .set("enabled", self.webp.enabled.to_string())
            .set("program", self.webp.program.clone())
            .set("quality", self.webp.quality.to_string())
            .set("flags", self.webp.flags.join(" "));
        ini
    }
}

fn parse_value<T>(section: &str, key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|reason: T::Err| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        })
}

fn parse_bool(section: &str, key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_all_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.server.port, 61091);
        assert_eq!(config.gallery.thumbnail_width, 200);
        assert_eq!(config.webp.quality, 50);
        assert!(config.webp.enabled);
    }

    #[test]
    fn test_full_file_parses_every_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(
            &path,
            "[server]\n\
             port = 8080\n\
             [gallery]\n\
             root = /srv/photos\n\
             thumbnail_width = 320\n\
             [webp]\n\
             enabled = false\n\
             program = /opt/cwebp\n\
             quality = 75\n\
             flags = -lossless -m 6\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gallery.root, PathBuf::from("/srv/photos"));
        assert_eq!(config.gallery.thumbnail_width, 320);
        assert!(!config.webp.enabled);
        assert_eq!(config.webp.program, "/opt/cwebp");
        assert_eq!(config.webp.quality, 75);
        assert_eq!(config.webp.flags, vec!["-lossless", "-m", "6"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.gallery, GallerySection::default());
        assert_eq!(config.webp, WebpSection::default());
    }

    #[test]
    fn test_bad_port_is_invalid_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[server]\nport = banana\n").unwrap();

        let error = ConfigFile::load_from(&path).unwrap_err();
        match error {
            ConfigError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "server");
                assert_eq!(key, "port");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_bool_is_invalid_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[webp]\nenabled = maybe\n").unwrap();

        assert!(matches!(
            ConfigFile::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.server.port = 7777;
        config.gallery.root = PathBuf::from("/pics");
        config.webp.flags = vec!["-m".to_string(), "6".to_string()];

        config.save_to(&path).unwrap();
        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_default_path_is_under_the_app_directory() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("photoshelf/config.ini"));
        }
    }
}
