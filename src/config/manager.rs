use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::InvalidConfig;
use crate::backend::BackendKind;
use crate::fs::atomic_write;
use crate::paths;
use crate::render::OutputMode;
use crate::ui::Palette;

/// Built-in poll interval.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
/// Built-in number of attempts per clipboard change.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Built-in delay before the first batch retry (doubles per retry).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
/// Built-in number of sentence requests in flight.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Built-in per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Watch settings in the `[watch]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Default translation backend.
    pub backend: Option<BackendKind>,
    /// Where translations go: print, write or both.
    pub mode: Option<OutputMode>,
    /// File appended to by the `write` mode (`~/` is expanded).
    pub output: Option<String>,
    /// Clipboard poll interval in milliseconds.
    pub interval_ms: Option<u64>,
    /// Attempts per clipboard change before giving up.
    pub max_attempts: Option<u32>,
    /// Delay before the first retry in milliseconds.
    pub retry_backoff_ms: Option<u64>,
    /// Sentence requests in flight per batch.
    pub concurrency: Option<usize>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Notification color.
    pub color: Option<String>,
    /// Notification background color.
    pub on_color: Option<String>,
}

/// Settings in the `[normalize]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Extra abbreviations whose periods never end a sentence.
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

/// Configuration for a translation backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Overrides the backend's API endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/autotrans/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Watch defaults.
    #[serde(default)]
    pub watch: WatchConfig,
    /// Normalizer extensions.
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Backend configurations keyed by backend name.
    #[serde(default)]
    pub backends: HashMap<String, BackendConfig>,
}

impl ConfigFile {
    /// Returns the settings for `kind`, if the file has a section for it.
    pub fn backend(&self, kind: BackendKind) -> Option<&BackendConfig> {
        self.backends.get(kind.name())
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The requested backend (before any credential fallback).
    pub backend: BackendKind,
    /// Output mode.
    pub mode: OutputMode,
    /// Output file for the `write` and `both` modes.
    pub output: Option<PathBuf>,
    /// Clipboard poll interval.
    pub interval: Duration,
    /// Attempts per clipboard change.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
    /// Sentence requests in flight.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Notification colors.
    pub palette: Palette,
    /// Extra abbreviations for the normalizer.
    pub abbreviations: Vec<String>,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Backend override.
    pub backend: Option<BackendKind>,
    /// Output mode override.
    pub mode: Option<OutputMode>,
    /// Output file override.
    pub output: Option<String>,
    /// Poll interval override in milliseconds.
    pub interval_ms: Option<u64>,
    /// Notification color override.
    pub color: Option<String>,
    /// Notification background color override.
    pub on_color: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns [`InvalidConfig`] for zero intervals, attempts or concurrency and
/// for unknown color names.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let watch = &config_file.watch;

    let backend = options
        .backend
        .or(watch.backend)
        .unwrap_or(BackendKind::Google);

    let mode = options.mode.or(watch.mode).unwrap_or(OutputMode::Print);

    let output = if mode.writes() {
        let raw = options
            .output
            .as_deref()
            .or(watch.output.as_deref())
            .unwrap_or(paths::DEFAULT_OUTPUT);
        Some(paths::expand_tilde(raw)?)
    } else {
        None
    };

    let interval_ms = options
        .interval_ms
        .or(watch.interval_ms)
        .unwrap_or(DEFAULT_INTERVAL_MS);
    if interval_ms == 0 {
        return Err(invalid(
            "'interval_ms' must be greater than 0\n\n\
             Please fix it via:\n  \
             - CLI option: autotrans --interval-ms <ms>\n  \
             - Config file: ~/.config/autotrans/config.toml",
        ));
    }

    let max_attempts = watch.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
    if max_attempts == 0 {
        return Err(invalid(
            "'max_attempts' must be at least 1\n\n\
             Fix [watch] max_attempts in ~/.config/autotrans/config.toml",
        ));
    }

    let concurrency = watch.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
    if concurrency == 0 {
        return Err(invalid(
            "'concurrency' must be at least 1\n\n\
             Fix [watch] concurrency in ~/.config/autotrans/config.toml",
        ));
    }

    let color = options.color.as_deref().or(watch.color.as_deref());
    let on_color = options.on_color.as_deref().or(watch.on_color.as_deref());
    let palette =
        Palette::parse(color, on_color).map_err(|e| anyhow::Error::new(InvalidConfig(e.to_string())))?;

    Ok(ResolvedConfig {
        backend,
        mode,
        output,
        interval: Duration::from_millis(interval_ms),
        max_attempts,
        retry_backoff: Duration::from_millis(
            watch.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS),
        ),
        concurrency,
        timeout: Duration::from_secs(watch.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        palette,
        abbreviations: config_file.normalize.abbreviations.clone(),
    })
}

fn invalid(message: &str) -> anyhow::Error {
    anyhow::Error::new(InvalidConfig(message.to_string()))
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/autotrans/config.toml`
    /// or `~/.config/autotrans/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).map_err(|e| {
            anyhow::Error::new(InvalidConfig(format!(
                "Failed to parse config file {}:\n{e}",
                self.config_path.display()
            )))
        })
    }

    /// Writes `config`, replacing the file atomically.
    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents, false)
    }

    /// Loads the config file, or defaults when none exists yet.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
