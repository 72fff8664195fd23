//! Application error types.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use crate::vfs::VfsError;

/// Errors that can occur during application startup.
#[derive(Debug)]
pub enum AppError {
    /// The gallery root could not be opened.
    Root(VfsError),

    /// The server socket could not be bound.
    Bind {
        addr: SocketAddr,
        source: io::Error,
    },

    /// The bound socket address could not be read back.
    LocalAddr(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Root(e) => {
                write!(f, "Failed to open gallery root: {}", e)
            }
            AppError::Bind { addr, source } => {
                write!(f, "Failed to bind {}: {}", addr, source)
            }
            AppError::LocalAddr(e) => {
                write!(f, "Failed to read the bound address: {}", e)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Root(e) => Some(e),
            AppError::Bind { source, .. } => Some(source),
            AppError::LocalAddr(e) => Some(e),
        }
    }
}

impl From<VfsError> for AppError {
    fn from(e: VfsError) -> Self {
        AppError::Root(e)
    }
}
