use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Sink;
use crate::session::TranslationPair;

/// Appends pairs to a Markdown file, translation as a blockquote.
///
/// Each pair is written and flushed on its own, so an interrupted run leaves
/// only complete pairs behind.
pub struct MarkdownFileSink {
    path: PathBuf,
    file: File,
}

impl MarkdownFileSink {
    /// Opens `path` for appending, creating it and its directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn format_pair(pair: &TranslationPair) -> String {
    format!("{}\n\n> {}\n\n", pair.original, pair.translated)
}

impl Sink for MarkdownFileSink {
    fn render(&mut self, pairs: &[TranslationPair]) -> Result<()> {
        for pair in pairs {
            self.file
                .write_all(format_pair(pair).as_bytes())
                .and_then(|()| self.file.flush())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }
        Ok(())
    }
}
