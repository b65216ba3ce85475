//! Logging setup shared by the binaries

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr unless
/// `file` is set, in which case lines are appended to that file without
/// colour codes.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let file = match &config.file {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match (config.is_json(), file) {
        (true, Some(file)) => fmt::layer().json().with_writer(file).boxed(),
        (true, None) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        (false, Some(file)) => fmt::layer().with_ansi(false).with_writer(file).boxed(),
        (false, None) => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
    Ok(())
}
