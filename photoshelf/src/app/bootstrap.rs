//! Application bootstrap implementation.
//!
//! This module contains `PhotoshelfApp` which handles the initialization
//! sequence for the gallery server: root validation first, then the
//! artifact cache, then the HTTP listener.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::config::AppConfig;
use super::error::AppError;
use crate::artifact::{ArtifactCache, CommandTranscoder, PassthroughTranscoder, Transcoder};
use crate::vfs::VfsRoot;
use crate::web::{self, AppState};

/// Running gallery server with lifecycle management.
///
/// The server task is spawned on the caller's runtime and runs until
/// [`shutdown`](Self::shutdown) cancels it. Dropping the app without
/// calling `shutdown` detaches the task; it keeps serving until the
/// runtime itself stops.
///
/// # Example
///
/// ```ignore
/// use photoshelf::app::{AppConfig, PhotoshelfApp};
///
/// let app = PhotoshelfApp::start(AppConfig::new("/photos")).await?;
/// let url = format!("http://localhost:{}/fs", app.local_addr().port());
///
/// // Later: graceful shutdown
/// app.shutdown().await;
/// ```
#[derive(Debug)]
pub struct PhotoshelfApp {
    /// Address the listener actually bound.
    local_addr: SocketAddr,

    /// Cancelling this token starts the graceful drain.
    shutdown: CancellationToken,

    /// Server task handle, joined during shutdown.
    server: JoinHandle<Result<(), io::Error>>,
}

impl PhotoshelfApp {
    /// Start the application with the given configuration.
    ///
    /// This method:
    /// 1. Opens the gallery root and validates it is a directory
    /// 2. Builds the artifact cache with the configured transcoder
    /// 3. Binds the listener and spawns the server task
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be opened or the socket
    /// cannot be bound.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        let vfs = VfsRoot::open(&config.root)?;
        info!(root = %vfs.root().display(), "gallery root opened");

        let transcoder: Arc<dyn Transcoder> = if config.webp.enabled {
            Arc::new(
                CommandTranscoder::new(&config.webp.program)
                    .with_quality(config.webp.quality)
                    .with_override_flags(config.webp.override_flags.clone()),
            )
        } else {
            Arc::new(PassthroughTranscoder)
        };

        let artifacts =
            ArtifactCache::new(vfs.root(), transcoder).with_thumbnail_width(config.thumbnail_width);

        let router = web::router(AppState::new(vfs, artifacts));

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(AppError::LocalAddr)?;
        info!(%local_addr, webp = config.webp.enabled, "gallery server listening");

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await
        });

        Ok(Self {
            local_addr,
            shutdown,
            server,
        })
    }

    /// Address the server is bound to.
    ///
    /// With port 0 in the config this reports the ephemeral port the
    /// kernel picked.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shutdown the application gracefully.
    ///
    /// Signals the server to stop accepting connections, waits for
    /// in-flight requests to drain, then joins the task.
    pub async fn shutdown(self) {
        info!("shutting down gallery server");
        self.shutdown.cancel();
        match self.server.await {
            Ok(Ok(())) => info!("gallery server stopped"),
            Ok(Err(error)) => error!(%error, "gallery server exited with an error"),
            Err(error) => error!(%error, "gallery server task failed"),
        }
    }
}
