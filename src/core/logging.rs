//! Logging setup
//!
//! Diagnostics go to stderr through tracing so stdout stays free for
//! flattened output and result sets.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the default filter
pub const LOG_ENV: &str = "INCFLAT_LOG";

/// Default filter directive for the given verbosity
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "incflat=error"
    } else if verbose {
        "incflat=debug"
    } else {
        "incflat=info"
    }
}

pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    // a global subscriber may already be set
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
