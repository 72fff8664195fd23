//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed as INI.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A present value does not parse as its expected type.
    #[error("invalid value for [{section}] {key}: {value:?} ({reason})")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The file could not be written back.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_names_the_key() {
        let error = ConfigError::InvalidValue {
            section: "server".to_string(),
            key: "port".to_string(),
            value: "banana".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("[server] port"));
        assert!(message.contains("banana"));
    }
}
