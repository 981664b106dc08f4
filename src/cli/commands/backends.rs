//! Backend listing command handler.

use anyhow::Result;

use super::load_config;
use crate::backend::{BackendKind, CredentialStore};
use crate::paths;
use crate::ui::Style;

/// Prints every backend with its endpoint override and credential status.
pub fn print_backends() -> Result<()> {
    let config = load_config()?;
    let store = CredentialStore::new(paths::credentials_dir()?);
    let default_backend = config.watch.backend.unwrap_or(BackendKind::Google);

    println!("{}\n", Style::header("Backends"));

    for kind in BackendKind::ALL {
        let settings = config.backend(kind);
        let marker = if kind == default_backend {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(kind));

        if let Some(endpoint) = settings.and_then(|s| s.endpoint.as_deref()) {
            println!(
                "    {} {}",
                Style::label("endpoint:  "),
                Style::secondary(endpoint)
            );
        }

        if kind.needs_credential() {
            let status = match store.locate(kind, settings) {
                Some((_, source)) => Style::success(format!("set ({source})")),
                None => Style::warning(format!(
                    "not set (run 'autotrans credentials {kind}')"
                )),
            };
            println!("    {} {status}", Style::label("credential:"));
        }
    }

    Ok(())
}
