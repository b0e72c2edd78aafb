//! Diagnostic logging.
//!
//! Calculators emit `tracing` events (`debug` for results, `warn` for
//! rejected inputs at the command layer). Output goes to stderr so it never
//! interleaves with a report on stdout.
//!
//! # Environment Variable
//!
//! `RUST_LOG` takes precedence over the scenario's `logging` section:
//! ```bash
//! RUST_LOG=debug fromagerie inventory --demand 12000
//! RUST_LOG=fromagerie::models=trace fromagerie run plant.yaml
//! ```

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Build the filter: `RUST_LOG` if set, else the config directives.
#[must_use]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(config.directives()).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Initialize logging with configuration.
///
/// Only the first call takes effect.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_filter(build_filter(config));

        // A global subscriber may already exist (tests, embedding apps).
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// Initialize logging with the default `warn` level.
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
