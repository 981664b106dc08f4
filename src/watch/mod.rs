//! Clipboard polling loop.

mod clipboard;
mod watcher;

pub use clipboard::{ClipboardSource, SystemClipboard};
pub use watcher::{ClipboardWatcher, WatchPolicy, WatchState, WatchSummary};
