//! Logging system initialization
//!
//! Structured logging via tracing-subscriber. The configured level acts
//! as the default filter; a RUST_LOG environment variable takes
//! precedence when present. The service logs to stdout only, rotation is
//! the deployment's concern.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub use crate::infrastructure::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let init_result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    init_result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
