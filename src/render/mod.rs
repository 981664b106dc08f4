//! Presentation of watch notifications and translation pairs.

mod file;
mod terminal;

pub use file::MarkdownFileSink;
pub use terminal::TerminalSink;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::session::TranslationPair;
use crate::ui::Palette;

/// Lifecycle notifications from the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Idle, waiting for new clipboard text.
    Waiting,
    /// New text found; translation is starting.
    Processing { chars: usize },
    /// An attempt failed and will be retried.
    Retrying {
        attempt: u32,
        max_attempts: u32,
        error: String,
    },
    /// Every attempt failed; the text is skipped.
    Failed { attempts: u32, error: String },
    /// The watcher is stopping.
    Farewell,
}

/// Receives notifications and translated batches.
pub trait Sink: Send {
    fn notify(&mut self, _event: &WatchEvent) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, pairs: &[TranslationPair]) -> Result<()>;
}

/// Fans out to zero or more sinks.
#[derive(Default)]
pub struct Sinks(Vec<Box<dyn Sink>>);

/// How many pairs of the current batch each sink has accepted.
///
/// Reusing one `Delivery` across retries of the same batch resumes every
/// sink where it stopped, so no sink sees a pair twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Delivery(Vec<usize>);

impl Delivery {
    /// Pairs accepted by the sink at `index`.
    pub fn delivered(&self, index: usize) -> usize {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl Sink + 'static) {
        self.0.push(Box::new(sink));
    }

    /// Delivers `event` to every sink. Failures are logged, not returned.
    pub fn notify(&mut self, event: &WatchEvent) {
        for sink in &mut self.0 {
            if let Err(e) = sink.notify(event) {
                tracing::warn!(error = %e, ?event, "sink notification failed");
            }
        }
    }

    /// Renders `pairs` one pair at a time, starting each sink after the
    /// pairs `delivery` says it already has.
    ///
    /// A failing sink stops at the failed pair while the others carry on.
    /// The first failure is returned.
    pub fn render(&mut self, pairs: &[TranslationPair], delivery: &mut Delivery) -> Result<()> {
        delivery.0.resize(self.0.len(), 0);
        let mut first_error = None;

        for (sink, done) in self.0.iter_mut().zip(delivery.0.iter_mut()) {
            while let Some(pair) = pairs.get(*done) {
                if let Err(e) = sink.render(std::slice::from_ref(pair)) {
                    first_error.get_or_insert(e);
                    break;
                }
                *done += 1;
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// Where translations go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Print pairs to the terminal.
    #[default]
    Print,
    /// Append pairs to a Markdown file.
    Write,
    /// Both print and append.
    Both,
}

impl OutputMode {
    pub const fn prints(self) -> bool {
        matches!(self, Self::Print | Self::Both)
    }

    pub const fn writes(self) -> bool {
        matches!(self, Self::Write | Self::Both)
    }
}

/// Builds the sinks for `mode`.
///
/// The terminal sink always receives notifications; it prints pairs only
/// when `mode` prints.
pub fn build_sinks(mode: OutputMode, output: Option<&Path>, palette: Palette) -> Result<Sinks> {
    let mut sinks = Sinks::new();
    sinks.push(TerminalSink::new(palette, mode.prints()));
    if mode.writes() {
        let Some(path) = output else {
            anyhow::bail!("Output mode '{mode:?}' needs an output file (--output)");
        };
        sinks.push(MarkdownFileSink::open(path)?);
    }
    Ok(sinks)
}
