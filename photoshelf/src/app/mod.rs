//! Application bootstrap and lifecycle management.
//!
//! This module provides the `PhotoshelfApp` type which handles proper
//! initialization sequencing and graceful shutdown of the gallery server.
//!
//! Startup runs in a fixed order:
//!
//! 1. Open and validate the gallery root (`VfsRoot`)
//! 2. Build the artifact cache with the configured transcoder
//! 3. Bind the listener and spawn the HTTP server task
//!
//! Shutdown is cooperative: cancelling the internal token lets the server
//! drain in-flight requests before the task exits.
//!
//! # Example
//!
//! ```ignore
//! use photoshelf::app::{AppConfig, PhotoshelfApp};
//!
//! let config = AppConfig::new("/photos").with_port(61091);
//! let app = PhotoshelfApp::start(config).await?;
//! println!("listening on {}", app.local_addr());
//!
//! // Graceful shutdown
//! app.shutdown().await;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::PhotoshelfApp;
pub use config::{AppConfig, WebpSettings};
pub use error::AppError;
