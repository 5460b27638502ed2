//! ## slotsim-telemetry::logging
//! **Structured logging with tracing**
//!
//! `RUST_LOG` wins over the configured level when set.

use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber. Fails if one is already set.
    pub fn init(default_level: &str) -> Result<(), InitError> {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .try_init()
    }

    /// Emits one structured run event, e.g. a run summary.
    #[inline]
    pub fn log_event(event_type: &str, fields: &[(&str, String)]) {
        let span = info_span!("run_event", event_type = event_type);
        let _entered = span.enter();
        tracing::info!(fields = ?fields, "Run event recorded");
    }
}
