//! Tracing subscriber setup.

use super::exporter;
use crate::infrastructure::paths::TRACE_FILE;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, else `config.trace_level`, else
/// [`DEFAULT_LEVEL`]. Human-readable output goes to stderr. When
/// `config.trace_export` is set, spans are also exported as JSON lines to
/// `moviescorn-traces.jsonl` in the data directory.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Failure to create the data directory disables export but not logging.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let otel_layer = if config.trace_export {
        let data_dir = config.data_dir();
        match std::fs::create_dir_all(&data_dir) {
            Ok(()) => {
                let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE));
                Some(OpenTelemetryLayer::new(provider.tracer(exporter::SERVICE_NAME)))
            }
            Err(e) => {
                eprintln!("moviescorn: trace export disabled, cannot create {}: {e}", data_dir.display());
                None
            }
        }
    } else {
        None
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
