//! Diagnostic logging setup shared by the binaries
//!
//! Report content goes to stdout; diagnostics (skipped files, loaded records) go
//! through [`tracing`] to stderr so the two never interleave in redirected output.

use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber, filtered by `RUST_LOG` (default `info`)
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
