//! Console logging for scripts and tests

pub use tracing::level_filters::LevelFilter;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid RUST_LOG filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::FromEnvError),
    #[error("failed to install global subscriber: {0}")]
    Subscriber(String),
}

/// Install the global fmt subscriber.
///
/// `level` is the default directive; `RUST_LOG` takes precedence when set.
///
/// # Errors
/// Returns [`LoggingError::Subscriber`] if a global subscriber is already set.
pub fn init(level: LevelFilter) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))
}
