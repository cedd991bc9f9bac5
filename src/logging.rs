//! Logging setup.

use std::io;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `GENCODE_LOG=gencode::ostrov=debug`.
pub const LOG_ENV: &str = "GENCODE_LOG";

const DEFAULT_FILTER: &str = "gencode=info";

/// Install the global subscriber, logging to stderr.
///
/// Falls back to `gencode=info` if `GENCODE_LOG` is unset or invalid.
/// Only the first call has any effect.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
