//! Browser launching for the served gallery.
//!
//! Uses the platform launcher rather than any browser directly, so the
//! user's default browser wins. Failures are logged and ignored; the
//! server keeps running either way.

use std::process::Command;

use tracing::warn;

/// Open `url` in the default browser.
pub fn open(url: &str) {
    if let Err(error) = launcher(url).spawn() {
        warn!(url, %error, "failed to open the browser");
    }
}

#[cfg(target_os = "macos")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
