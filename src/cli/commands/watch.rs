use anyhow::Result;

use super::{build_session, load_config};
use crate::backend::TranslationBackend;
use crate::cli::WatchArgs;
use crate::config::resolve_config;
use crate::context::AppContext;
use crate::render::build_sinks;
use crate::shutdown::Cancellation;
use crate::status;
use crate::ui::Style;
use crate::watch::{ClipboardWatcher, SystemClipboard, WatchPolicy, WatchSummary};

/// Watches the clipboard until `cancel` fires.
pub async fn run_watch(args: &WatchArgs, cancel: Cancellation) -> Result<WatchSummary> {
    let config_file = load_config()?;
    let resolved = resolve_config(&args.resolve_options(), &config_file)?;
    let ctx = AppContext::from_config(config_file, resolved.timeout)?;

    let session = build_session(&resolved, &ctx)?;
    let sinks = build_sinks(resolved.mode, resolved.output.as_deref(), resolved.palette)?;
    let source = SystemClipboard::new()?;

    status!(
        "{} {}",
        Style::label("backend"),
        Style::value(session.backend().name())
    );
    if let Some(path) = &resolved.output {
        status!(
            "{} {}",
            Style::label("output"),
            Style::secondary(path.display())
        );
    }

    let mut watcher = ClipboardWatcher::new(source, session, sinks, WatchPolicy::from(&resolved));
    Ok(watcher.run(cancel).await)
}
