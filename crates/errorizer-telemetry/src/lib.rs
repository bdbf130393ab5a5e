//! Logging setup for errorizer
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a text or
//! JSON `fmt` layer.

use errorizer_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// The filter comes from `RUST_LOG` when set, then the configured
/// `log_filter`, then `default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = build_filter(config, default_filter);
    let format = config.map_or(LogFormat::Text, |c| c.format);

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true);

            registry.with(fmt_layer).try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

fn build_filter(config: Option<&TelemetryConfig>, default_filter: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directives = config
        .and_then(|c| c.log_filter.as_deref())
        .unwrap_or(default_filter);

    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_filter: Option<&str>) -> TelemetryConfig {
        TelemetryConfig {
            log_filter: log_filter.map(str::to_owned),
            format: LogFormat::Text,
        }
    }

    #[test]
    fn default_filter_without_config() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(build_filter(None, "warn").to_string(), "warn");
        });
    }

    #[test]
    fn configured_filter_wins_over_default() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = config(Some("errorizer_core=debug"));
            assert_eq!(build_filter(Some(&config), "info").to_string(), "errorizer_core=debug");
        });
    }

    #[test]
    fn rust_log_wins_over_config() {
        temp_env::with_var("RUST_LOG", Some("trace"), || {
            let config = config(Some("debug"));
            assert_eq!(build_filter(Some(&config), "info").to_string(), "trace");
        });
    }
}
