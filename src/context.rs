//! Process-wide state created once at startup.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::backend::{BackendKind, CredentialStore};
use crate::config::{BackendConfig, ConfigFile};
use crate::paths;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration, credential store and the shared HTTP client.
#[derive(Debug)]
pub struct AppContext {
    config: ConfigFile,
    credentials: CredentialStore,
    http: Client,
}

impl AppContext {
    /// Builds a context with an explicit credential store.
    ///
    /// `timeout` bounds every backend request; `None` leaves requests
    /// unbounded.
    pub fn new(
        config: ConfigFile,
        credentials: CredentialStore,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            credentials,
            http,
        })
    }

    /// Builds a context using the credential directory under the config dir.
    pub fn from_config(config: ConfigFile, timeout: Duration) -> Result<Self> {
        let credentials = CredentialStore::new(paths::credentials_dir()?);
        Self::new(config, credentials, Some(timeout))
    }

    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub const fn http(&self) -> &Client {
        &self.http
    }

    pub fn backend_config(&self, kind: BackendKind) -> Option<&BackendConfig> {
        self.config.backend(kind)
    }
}
