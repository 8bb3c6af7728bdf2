//! Tracing/logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Single-line human readable output.
    Compact,
}

pub fn init() {
    init_with(LogFormat::default());
}

pub fn init_with(format: LogFormat) {
    init_with_filter(format, DEFAULT_FILTER);
}

/// Initialize with `default_filter` used when `RUST_LOG` is unset or invalid.
///
/// Events go to stderr so command output on stdout stays clean.
///
/// Returns whether this call installed the subscriber; `false` means one was
/// already set and nothing changed.
pub fn init_with_filter(format: LogFormat, default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_timer(tracing_subscriber::fmt::time::SystemTime)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init_with_filter(LogFormat::Compact, "debug");
        assert!(!init_with_filter(LogFormat::Json, "info"));
        init();
    }
}
