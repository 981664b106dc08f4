use anyhow::{Context, Result};
use arboard::Clipboard;

/// A polled source of clipboard text.
pub trait ClipboardSource {
    /// Returns the current text, or `None` when the clipboard holds no text.
    fn read(&mut self) -> Result<Option<String>>;
}

/// The OS clipboard.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to access the system clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSource for SystemClipboard {
    fn read(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e).context("Failed to read clipboard text"),
        }
    }
}
