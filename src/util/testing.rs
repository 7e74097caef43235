//! Shared tracing setup for unit and integration tests

use std::sync::Once;

use tracing::info;
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

use crate::util::logging::is_noisy;

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `docli=trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docli=trace"));
        let module_filter = filter_fn(|metadata| !is_noisy(metadata.target()));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_filter(module_filter)
            .with_filter(env_filter);

        if tracing_subscriber::registry().with(layer).try_init().is_ok() {
            info!("Test Setup complete");
        }
    });
}
