//! Logging setup: `tracing` events rendered as text or JSON lines.

use tracing_subscriber::EnvFilter;

use super::config::{AppCfg, LogFormat};

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(cfg: &AppCfg) {
    let filter = EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match cfg.log_format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
