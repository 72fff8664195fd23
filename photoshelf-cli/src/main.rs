//! Photoshelf CLI - serve a directory of photos as a web gallery.
//!
//! The binary is a thin wrapper around the `photoshelf` library: it
//! resolves configuration (defaults, then the config file, then flags),
//! starts the server, opens the browser, and waits for Ctrl+C.

mod browser;
mod error;

use std::path::PathBuf;

use clap::Parser;
use photoshelf::app::{AppConfig, PhotoshelfApp};
use photoshelf::config::ConfigFile;
use photoshelf::logging;
use tracing::warn;

use crate::error::CliError;

/// Serve a directory of photos as a browsable web gallery.
#[derive(Debug, Parser)]
#[command(name = "photoshelf", version, about)]
struct Args {
    /// Directory to serve (overrides the configured gallery root)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, value_name = "N")]
    port: Option<u16>,

    /// Thumbnail target width in pixels
    #[arg(long, value_name = "N")]
    width: Option<u32>,

    /// WebP encoder quality (0-100)
    #[arg(long, value_name = "N")]
    webp_quality: Option<u8>,

    /// Encoder flags replacing the default quality arguments,
    /// space-separated (e.g. "-q 80 -m 6")
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    webp_args: Option<String>,

    /// Disable WebP generation; WebP requests serve the original file
    #[arg(long)]
    no_webp: bool,

    /// Do not open the browser after startup
    #[arg(long)]
    no_open: bool,

    /// Configuration file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily rolling file in this directory
    #[arg(long, value_name = "PATH")]
    log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = resolve_config(&args)?;

    // Keep the guard alive so file logging flushes on exit.
    let _guard = logging::init(args.verbose, args.log_dir.as_deref());

    let app = PhotoshelfApp::start(config).await?;
    let url = format!("http://localhost:{}/fs", app.local_addr().port());

    println!("Photoshelf v{}", photoshelf::VERSION);
    println!("Serving the gallery at {}", url);
    println!("Press Ctrl+C to stop");

    if !args.no_open {
        browser::open(&url);
    }

    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for the shutdown signal");
    }

    println!();
    println!("Shutting down...");
    app.shutdown().await;

    Ok(())
}

/// Resolve the runtime configuration: defaults, then the config file,
/// then command line flags.
fn resolve_config(args: &Args) -> Result<AppConfig, CliError> {
    let file = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let mut config = AppConfig::from_config_file(&file);

    if let Some(dir) = &args.dir {
        config.root = dir.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(width) = args.width {
        config.thumbnail_width = width;
    }
    if let Some(quality) = args.webp_quality {
        config.webp.quality = quality;
    }
    if let Some(flags) = &args.webp_args {
        config.webp.override_flags = flags.split_whitespace().map(str::to_string).collect();
    }
    if args.no_webp {
        config.webp.enabled = false;
    }

    Ok(config)
}
