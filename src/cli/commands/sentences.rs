use anyhow::Result;
use std::path::Path;

use super::{load_config, normalizer};
use crate::input::InputReader;
use crate::text::{RULES_VERSION, SentenceSplitter};
use crate::ui::Style;
use crate::{output, status};

/// Prints one sentence unit per line, as the watcher would send them.
///
/// With `verbose`, a summary naming the rule table version goes to stderr.
pub fn print_sentences(file: Option<&Path>, verbose: bool) -> Result<()> {
    let text = InputReader::read(file)?;
    let config = load_config()?;
    let normalizer = normalizer(&config.normalize.abbreviations)?;

    let sentences = SentenceSplitter.split(&normalizer.normalize(&text));
    for sentence in &sentences {
        println!("{sentence}");
    }
    output::flush_stdout();

    if verbose {
        status!(
            "{} {} sentence(s), rules v{RULES_VERSION}",
            Style::label("split:"),
            sentences.len()
        );
    }

    Ok(())
}
