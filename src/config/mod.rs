//! Configuration file management and backend settings.

mod manager;

pub use manager::{
    BackendConfig, ConfigFile, ConfigManager, DEFAULT_CONCURRENCY, DEFAULT_INTERVAL_MS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS, NormalizeConfig, ResolveOptions,
    ResolvedConfig, WatchConfig, resolve_config,
};

/// A configuration value that cannot be used.
///
/// Kept as a distinct type so `main` can exit with `EX_CONFIG`.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InvalidConfig(pub String);
