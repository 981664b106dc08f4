//! Where output goes.
//!
//! Translation pairs are the only thing written to stdout, so
//! `autotrans translate < paper.txt > pairs.txt` captures just the pairs.
//! Watch notifications, prompts and warnings go to stderr. `--quiet`
//! silences notifications but never warnings or errors.

use std::io::{self, Write};
use std::sync::OnceLock;

static OUTPUT: OnceLock<OutputConfig> = OnceLock::new();

/// Process-wide output switches, set once from the CLI flags.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    /// `--no-color` and a set `NO_COLOR` both disable colors.
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color: no_color || no_color_env(),
        }
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Sets the switches. Later calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT.set(config);
}

fn current() -> &'static OutputConfig {
    OUTPUT.get_or_init(|| OutputConfig::from_flags(false, false))
}

pub fn is_quiet() -> bool {
    current().quiet
}

pub fn is_no_color() -> bool {
    current().no_color
}

/// Notification on stderr, dropped in quiet mode.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Like [`status!`] without the newline, for the waiting prompt.
#[macro_export]
macro_rules! status_no_newline {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprint!($($arg)*);
            $crate::output::flush_stderr();
        }
    };
}

/// Warning or error on stderr, shown even in quiet mode.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

pub fn flush_stderr() {
    let _ = io::stderr().flush();
}

/// Pairs are printed in pieces; flush so a pipe sees whole pairs.
pub fn flush_stdout() {
    let _ = io::stdout().flush();
}
