//! Backend credentials: one key file per backend under the config directory.

use anyhow::{Result, bail};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::BackendKind;
use crate::config::BackendConfig;
use crate::fs::atomic_write;

/// An API key. Never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for building a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where a credential was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Env(String),
    Config,
    File(PathBuf),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => write!(f, "${var}"),
            Self::Config => f.write_str("config.toml"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A backend needs a key and none was found.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "no credential for {backend}: set {env_hint} or run 'autotrans credentials {backend}' \
     (looked in {})",
    .key_file.display()
)]
pub struct CredentialMissing {
    pub backend: BackendKind,
    pub key_file: PathBuf,
    env_hint: &'static str,
}

/// Reads and writes `<dir>/<backend>.key` files.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn key_file(&self, kind: BackendKind) -> PathBuf {
        self.dir.join(format!("{}.key", kind.name()))
    }

    /// Finds the key for `kind`.
    ///
    /// Order: environment variable (configured name, else the backend's
    /// default), `api_key` in config.toml, then the key file.
    pub fn locate(
        &self,
        kind: BackendKind,
        settings: Option<&BackendConfig>,
    ) -> Option<(Credential, CredentialSource)> {
        let env_var = settings
            .and_then(|s| s.api_key_env.as_deref())
            .or_else(|| kind.default_key_env());
        if let Some(var) = env_var
            && let Ok(key) = std::env::var(var)
            && !key.trim().is_empty()
        {
            return Some((
                Credential::new(key.trim()),
                CredentialSource::Env(var.to_string()),
            ));
        }

        if let Some(key) = settings
            .and_then(|s| s.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            return Some((Credential::new(key), CredentialSource::Config));
        }

        self.load(kind)
            .map(|credential| (credential, CredentialSource::File(self.key_file(kind))))
    }

    /// Reads the key file for `kind`; a missing or empty file yields `None`.
    pub fn load(&self, kind: BackendKind) -> Option<Credential> {
        let path = self.key_file(kind);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let key = contents.trim();
                (!key.is_empty()).then(|| Credential::new(key))
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read key file");
                }
                None
            }
        }
    }

    /// Stores `key` for `kind`, readable by the owner only.
    pub fn save(&self, kind: BackendKind, key: &str) -> Result<PathBuf> {
        let key = key.trim();
        if key.is_empty() {
            bail!("API key cannot be empty");
        }
        let path = self.key_file(kind);
        atomic_write(&path, key, true)?;
        Ok(path)
    }

    /// The error reported when [`Self::locate`] finds nothing.
    pub fn missing(&self, kind: BackendKind) -> CredentialMissing {
        CredentialMissing {
            backend: kind,
            key_file: self.key_file(kind),
            env_hint: kind.default_key_env().unwrap_or("an API key"),
        }
    }
}
