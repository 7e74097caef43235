//! Console tracing layer shared by the binary and the tests
//!
//! Without `--debug` only warnings and errors reach stderr;
//! user-facing lines go through the reporter, never through tracing.

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Dependencies whose debug output drowns ours.
pub const NOISY_MODULES: [&str; 3] = ["hyper", "reqwest", "native_tls"];

/// True if events from `target` should be dropped.
pub fn is_noisy(target: &str) -> bool {
    NOISY_MODULES.iter().any(|name| target.starts_with(name))
}

/// Formatted layer writing to `writer`: DEBUG with `debug`, WARN otherwise.
pub fn console_layer<S, W>(debug: bool, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    fmt::layer()
        .with_writer(writer)
        .with_target(debug)
        .with_thread_names(false)
        .with_filter(level)
        .with_filter(filter_fn(|metadata| !is_noisy(metadata.target())))
}
