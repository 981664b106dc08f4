//! Credentials command handler for storing backend keys.

use anyhow::{Context, Result, bail};
use inquire::validator::ValueRequiredValidator;
use inquire::{InquireError, Password};
use std::path::PathBuf;

use crate::backend::{BackendKind, CredentialStore};
use crate::paths;
use crate::status;
use crate::ui::Style;

/// Prompts for an API key and stores it in the backend's key file.
///
/// Backing out of the prompt (Esc or Ctrl+C) leaves any stored key as is.
pub fn run_credentials(kind: BackendKind) -> Result<()> {
    if !kind.needs_credential() {
        bail!("The {kind} backend does not use an API key");
    }

    let store = CredentialStore::new(paths::credentials_dir()?);
    if store.load(kind).is_some() {
        println!(
            "{} an existing key in {} will be replaced",
            Style::warning("note:"),
            Style::secondary(store.key_file(kind).display())
        );
    }

    let answer = Password::new(&format!("{kind} API key:"))
        .without_confirmation()
        .with_help_message("Stored with owner-only permissions")
        .with_validator(ValueRequiredValidator::new("API key cannot be empty"))
        .prompt();

    match store_answer(&store, kind, answer)? {
        Some(path) => println!(
            "{} Key saved to {}",
            Style::success("✓"),
            Style::secondary(path.display())
        ),
        None => status!("\nNo key stored."),
    }

    Ok(())
}

/// Saves a prompted key. Returns `None` when the prompt was cancelled.
fn store_answer(
    store: &CredentialStore,
    kind: BackendKind,
    answer: Result<String, InquireError>,
) -> Result<Option<PathBuf>> {
    match answer {
        Ok(key) => store.save(kind, &key).map(Some),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read the API key"),
    }
}
