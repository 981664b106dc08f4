use anyhow::{Result, bail};
use std::path::PathBuf;

use super::{build_session, load_config};
use crate::backend::BackendKind;
use crate::config::{ResolveOptions, resolve_config};
use crate::context::AppContext;
use crate::input::InputReader;
use crate::render::{Delivery, OutputMode, build_sinks};
use crate::session::TranslationPair;
use crate::shutdown;
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub mode: Option<OutputMode>,
    pub output: Option<String>,
}

/// Translates a file or stdin once, rendering pairs like the watcher does.
///
/// Ctrl+C renders the pairs finished so far and ends the run cleanly.
pub async fn run_translate(options: TranslateOptions) -> Result<TranslateReport> {
    let source_text = InputReader::read(options.file.as_deref())?;
    if source_text.trim().is_empty() {
        bail!("Input is empty");
    }

    let config_file = load_config()?;
    let resolve_options = ResolveOptions {
        backend: options.backend,
        mode: options.mode,
        output: options.output,
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&resolve_options, &config_file)?;
    let ctx = AppContext::from_config(config_file, resolved.timeout)?;

    let session = build_session(&resolved, &ctx)?;
    let mut sinks = build_sinks(resolved.mode, resolved.output.as_deref(), resolved.palette)?;

    let mut cancel = shutdown::on_ctrl_c();
    let spinner = Spinner::new("Translating...");
    let outcome = session.run(&source_text, &mut cancel).await;
    spinner.stop();

    let mut delivery = Delivery::default();
    match outcome {
        Ok(pairs) => {
            sinks.render(&pairs, &mut delivery)?;
            Ok(TranslateReport::from_pairs(&pairs, false))
        }
        Err(interrupted) => {
            tracing::info!(%interrupted, "translation cancelled");
            sinks.render(&interrupted.completed, &mut delivery)?;
            Ok(TranslateReport::from_pairs(&interrupted.completed, true))
        }
    }
}

/// What a one-shot translation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateReport {
    /// Pairs rendered.
    pub rendered: usize,
    /// Rendered pairs that carry a failure marker.
    pub failed: usize,
    /// Ctrl+C stopped the run before every sentence was translated.
    pub interrupted: bool,
}

impl TranslateReport {
    fn from_pairs(pairs: &[TranslationPair], interrupted: bool) -> Self {
        Self {
            rendered: pairs.len(),
            failed: pairs.iter().filter(|pair| pair.failed).count(),
            interrupted,
        }
    }
}
