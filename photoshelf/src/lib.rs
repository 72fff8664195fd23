//! Photoshelf - Local photo gallery server
//!
//! This library provides the core functionality for browsing a directory
//! tree of images over HTTP: path-contained filesystem access, natural
//! ordering, on-demand thumbnail and WebP generation, and the gallery
//! web surface.
//!
//! The [`app`] module ties the pieces together; `photoshelf-cli` is a
//! thin wrapper around it.

pub mod app;
pub mod artifact;
pub mod config;
pub mod listing;
pub mod logging;
pub mod order;
pub mod vfs;
pub mod web;

/// Crate version, surfaced in the CLI startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
