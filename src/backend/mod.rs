//! Translation backends: one remote call per sentence, target language fixed
//! to Japanese.

mod credentials;
mod deepl;
mod google;
mod noop;

pub use credentials::{Credential, CredentialMissing, CredentialSource, CredentialStore};
pub use deepl::DeepLBackend;
pub use google::GoogleBackend;
pub use noop::NoOpBackend;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

use crate::context::AppContext;

/// Language every backend translates into.
pub const TARGET_LANGUAGE: &str = "ja";

/// Failure of a single translation call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport failure or timeout.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{backend} returned {status}: {body}")]
    Status {
        backend: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response did not have the expected shape.
    #[error("unexpected {backend} response: {reason}")]
    Malformed {
        backend: &'static str,
        reason: String,
    },
}

impl BackendError {
    /// Drops the request URL, which can carry the sentence text.
    pub fn request(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

/// Capability to translate one sentence.
pub trait TranslationBackend: Send + Sync {
    /// Short lowercase name used in logs and messages.
    fn name(&self) -> &'static str;

    /// Translates `sentence` into [`TARGET_LANGUAGE`].
    fn translate(
        &self,
        sentence: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

/// Available backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Public Google endpoint, no key needed.
    Google,
    /// `DeepL` API, needs an auth key.
    Deepl,
    /// Returns empty translations without network access.
    Noop,
}

impl BackendKind {
    pub const ALL: [Self; 3] = [Self::Google, Self::Deepl, Self::Noop];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Deepl => "deepl",
            Self::Noop => "noop",
        }
    }

    pub const fn needs_credential(self) -> bool {
        matches!(self, Self::Deepl)
    }

    /// Environment variable checked for a key when the config names none.
    pub const fn default_key_env(self) -> Option<&'static str> {
        match self {
            Self::Deepl => Some("DEEPL_AUTH_KEY"),
            Self::Google | Self::Noop => None,
        }
    }

    /// Backend tried next when this one cannot be built.
    pub const fn fallback(self) -> Option<Self> {
        match self {
            Self::Deepl => Some(Self::Google),
            Self::Google | Self::Noop => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constructed backend.
#[derive(Debug)]
pub enum Backend {
    Google(GoogleBackend),
    Deepl(DeepLBackend),
    Noop(NoOpBackend),
}

impl Backend {
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Google(_) => BackendKind::Google,
            Self::Deepl(_) => BackendKind::Deepl,
            Self::Noop(_) => BackendKind::Noop,
        }
    }
}

impl TranslationBackend for Backend {
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    async fn translate(&self, sentence: &str) -> Result<String, BackendError> {
        match self {
            Self::Google(backend) => backend.translate(sentence).await,
            Self::Deepl(backend) => backend.translate(sentence).await,
            Self::Noop(backend) => backend.translate(sentence).await,
        }
    }
}

/// Builds the backend for `kind`, loading its credential if it needs one.
pub fn build_backend(kind: BackendKind, ctx: &AppContext) -> Result<Backend, CredentialMissing> {
    let settings = ctx.backend_config(kind);
    let endpoint = settings.and_then(|s| s.endpoint.clone());

    match kind {
        BackendKind::Google => Ok(Backend::Google(GoogleBackend::new(
            ctx.http().clone(),
            endpoint,
        ))),
        BackendKind::Deepl => {
            let (credential, source) = ctx
                .credentials()
                .locate(kind, settings)
                .ok_or_else(|| ctx.credentials().missing(kind))?;
            tracing::debug!(backend = kind.name(), %source, "loaded credential");
            Ok(Backend::Deepl(DeepLBackend::new(
                ctx.http().clone(),
                credential,
                endpoint,
            )))
        }
        BackendKind::Noop => Ok(Backend::Noop(NoOpBackend)),
    }
}

/// Builds `requested`, walking the fallback chain on missing credentials.
///
/// Every skipped backend is returned so the caller can report it. When the
/// chain runs out the no-op backend is used.
pub fn build_with_fallback(
    requested: BackendKind,
    ctx: &AppContext,
) -> (Backend, Vec<CredentialMissing>) {
    let mut skipped = Vec::new();
    let mut next = Some(requested);

    while let Some(kind) = next {
        match build_backend(kind, ctx) {
            Ok(backend) => return (backend, skipped),
            Err(missing) => {
                tracing::warn!(backend = kind.name(), "credential missing, falling back");
                skipped.push(missing);
                next = kind.fallback();
            }
        }
    }

    (Backend::Noop(NoOpBackend), skipped)
}

/// Maps a non-success response to [`BackendError::Status`].
async fn ensure_success(
    backend: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        backend,
        status,
        body: body.trim().chars().take(200).collect(),
    })
}
