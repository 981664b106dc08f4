use anyhow::Result;

use super::{Sink, WatchEvent};
use crate::session::TranslationPair;
use crate::ui::{Palette, Spinner, Style};
use crate::{output, status, status_no_newline};

const WAITING: &str = "give me text on clipboard... [quit: Ctrl+C]";
const FOUND: &str = "found text on clipboard! translating into Japanese...";

/// Notifications on stderr, pairs on stdout.
pub struct TerminalSink {
    palette: Palette,
    print_pairs: bool,
    spinner: Option<Spinner>,
}

impl TerminalSink {
    pub const fn new(palette: Palette, print_pairs: bool) -> Self {
        Self {
            palette,
            print_pairs,
            spinner: None,
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }
}

impl Sink for TerminalSink {
    fn notify(&mut self, event: &WatchEvent) -> Result<()> {
        match event {
            WatchEvent::Waiting => {
                self.stop_spinner();
                status_no_newline!("\r{}", self.palette.paint(WAITING));
            }
            WatchEvent::Processing { chars } => {
                status!("\n{}", self.palette.paint(FOUND));
                self.spinner = Some(Spinner::new(&format!("Translating {chars} characters...")));
            }
            WatchEvent::Retrying {
                attempt,
                max_attempts,
                error,
            } => {
                self.stop_spinner();
                status!(
                    "{} attempt {attempt}/{max_attempts} failed: {error}",
                    Style::warning("retrying:")
                );
                self.spinner = Some(Spinner::new("Retrying..."));
            }
            WatchEvent::Failed { attempts, error } => {
                self.stop_spinner();
                crate::warn!(
                    "{} giving up after {attempts} attempts: {error}",
                    Style::error("error:")
                );
            }
            WatchEvent::Farewell => {
                self.stop_spinner();
                status!("\n{}", self.palette.paint("Bye."));
            }
        }
        Ok(())
    }

    fn render(&mut self, pairs: &[TranslationPair]) -> Result<()> {
        self.stop_spinner();
        if !self.print_pairs {
            return Ok(());
        }
        for pair in pairs {
            let translated = if pair.failed {
                Style::error(&pair.translated)
            } else {
                Style::value(&pair.translated)
            };
            println!("{}\n{translated}\n", pair.original);
        }
        output::flush_stdout();
        Ok(())
    }
}
