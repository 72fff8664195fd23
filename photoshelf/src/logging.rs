//! Tracing subscriber setup for the gallery server.
//!
//! Events go to stderr by default. When a log directory is given, they
//! go to a daily rolling file in that directory instead, written through
//! a non-blocking background thread.
//!
//! The filter honors `RUST_LOG` when set; otherwise a crate-scoped
//! default applies.

use std::io;
use std::path::Path;

use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::EnvFilter;

/// Log file name stem; the rolling appender adds the date suffix.
const LOG_FILE_PREFIX: &str = "photoshelf.log";

/// Initialize the global tracing subscriber.
///
/// Returns a guard when logging to a file; it must stay alive for the
/// duration of the program or buffered events are lost.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // Local offset lookup fails once worker threads exist; timestamps
    // then fall back to UTC.
    let timer =
        OffsetTime::local_rfc_3339().unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_writer(io::stderr)
                .init();
            None
        }
    }
}

/// Filter directives used when `RUST_LOG` is absent.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "photoshelf=debug,tower_http=debug"
    } else {
        "photoshelf=info"
    }
}
