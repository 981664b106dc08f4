//! # autotrans - clipboard translator for paper reading
//!
//! `autotrans` watches the clipboard for text copied out of PDFs, repairs
//! hard line wraps and hyphenation, splits the text into sentences and
//! translates each sentence into Japanese.
//!
//! ## Features
//!
//! - **Sentence resegmentation**: abbreviation-aware normalization (`cf.`,
//!   `et al.`, `Fig. 3`, `3.14`) followed by Unicode sentence splitting
//! - **Fault isolation**: a failing sentence shows an error marker, the rest
//!   of the batch is still translated
//! - **Multiple backends**: Google (no key), `DeepL` (API key), no-op
//! - **Output modes**: print pairs, append them to a Markdown file, or both
//!
//! ## Quick Start
//!
//! ```bash
//! # Watch the clipboard and print translations
//! autotrans
//!
//! # Use DeepL and also keep a Markdown log
//! autotrans --backend deepl --mode both -o ~/paper_translated/tmp/tmp.md
//!
//! # See how a text is split
//! pbpaste | autotrans sentences
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/autotrans/config.toml`:
//!
//! ```toml
//! [watch]
//! backend = "deepl"
//! mode = "print"
//!
//! [normalize]
//! abbreviations = ["Thm.", "Lem."]
//!
//! [backends.deepl]
//! api_key_env = "DEEPL_AUTH_KEY"
//! ```

/// Translation backends and credential storage.
pub mod backend;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and backend settings.
pub mod config;

/// Process-wide context (config, credentials, HTTP client).
pub mod context;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and credentials.
pub mod paths;

/// Notification and translation sinks.
pub mod render;

/// Batch translation pipeline.
pub mod session;

/// Cooperative cancellation.
pub mod shutdown;

/// Text normalization and sentence splitting.
pub mod text;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Clipboard watch loop.
pub mod watch;
