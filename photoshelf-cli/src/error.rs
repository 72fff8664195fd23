//! CLI error types.

use std::fmt;

use photoshelf::app::AppError;
use photoshelf::config::ConfigError;

/// Errors that terminate the CLI with a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    /// The configuration file could not be loaded.
    Config(ConfigError),

    /// The application failed to start.
    App(AppError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {}", e)
            }
            CliError::App(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::App(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoshelf::vfs::VfsError;
    use std::path::PathBuf;

    #[test]
    fn test_cli_error_display_config() {
        let err = CliError::Config(ConfigError::InvalidValue {
            section: "server".to_string(),
            key: "port".to_string(),
            value: "lots".to_string(),
            reason: "not a number".to_string(),
        });
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_cli_error_from_app_error() {
        let app_err = AppError::Root(VfsError::RootNotFound {
            path: PathBuf::from("/absent"),
        });
        let cli_err: CliError = app_err.into();
        assert!(matches!(cli_err, CliError::App(_)));
    }
}
