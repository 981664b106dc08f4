//! Subcommand implementations.

use anyhow::Result;

use crate::backend::{Backend, build_with_fallback};
use crate::config::{ConfigFile, ConfigManager, ResolvedConfig};
use crate::context::AppContext;
use crate::session::TranslationSession;
use crate::text::{DEFAULT_RULES, TextNormalizer};
use crate::ui::Style;

/// Backend listing command handler.
pub mod backends;

/// Credential storage command handler.
pub mod credentials;

/// Sentence preview command handler.
pub mod sentences;

/// One-shot translation command handler.
pub mod translate;

/// Clipboard watch command handler.
pub mod watch;

fn load_config() -> Result<ConfigFile> {
    ConfigManager::new()?.load_or_default()
}

fn normalizer(abbreviations: &[String]) -> Result<TextNormalizer> {
    TextNormalizer::new(DEFAULT_RULES, abbreviations)
}

/// Builds the requested backend, reporting every fallback step.
fn build_session(
    resolved: &ResolvedConfig,
    ctx: &AppContext,
) -> Result<TranslationSession<Backend>> {
    let (backend, skipped) = build_with_fallback(resolved.backend, ctx);
    for missing in &skipped {
        crate::warn!("{} {missing}", Style::warning("warning:"));
    }
    if !skipped.is_empty() {
        crate::warn!(
            "{} using the {} backend instead",
            Style::warning("warning:"),
            Style::value(backend.kind())
        );
    }

    Ok(TranslationSession::new(backend)
        .with_normalizer(normalizer(&resolved.abbreviations)?)
        .with_concurrency(resolved.concurrency))
}
