use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::backend::BackendKind;
use crate::config::ResolveOptions;
use crate::render::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "autotrans")]
#[command(about = "Watch the clipboard and translate copied paper text into Japanese")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub watch: WatchArgs,

    /// Suppress status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show diagnostic logs (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options for watching the clipboard.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// Translation backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Where translations go
    #[arg(short, long, value_enum)]
    pub mode: Option<OutputMode>,

    /// Markdown file appended to in write/both mode
    #[arg(short, long)]
    pub output: Option<String>,

    /// Clipboard poll interval in milliseconds
    #[arg(short, long = "interval-ms")]
    pub interval_ms: Option<u64>,

    /// Notification color (e.g. green, light_cyan)
    #[arg(long)]
    pub color: Option<String>,

    /// Notification background color
    #[arg(long)]
    pub on_color: Option<String>,
}

impl WatchArgs {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            backend: self.backend,
            mode: self.mode,
            output: self.output.clone(),
            interval_ms: self.interval_ms,
            color: self.color.clone(),
            on_color: self.on_color.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a file (or stdin) once and exit
    Translate {
        /// File to translate (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Translation backend
        #[arg(short, long, value_enum)]
        backend: Option<BackendKind>,

        /// Where translations go
        #[arg(short, long, value_enum)]
        mode: Option<OutputMode>,

        /// Markdown file appended to in write/both mode
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the sentence units a text is split into
    Sentences {
        /// File to read (reads from stdin if not provided)
        file: Option<PathBuf>,
    },
    /// List backends and their credential status
    Backends,
    /// Store an API key for a backend
    Credentials {
        /// Backend to store the key for
        #[arg(value_enum)]
        backend: BackendKind,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_watch_flags_parse() {
        let args = Args::try_parse_from([
            "autotrans", "-b", "deepl", "-m", "both", "-o", "~/out.md", "-i", "250", "-vv",
        ])
        .unwrap();

        assert!(args.command.is_none());
        assert_eq!(args.watch.backend, Some(BackendKind::Deepl));
        assert_eq!(args.watch.mode, Some(OutputMode::Both));
        assert_eq!(args.verbose, 2);

        let options = args.watch.resolve_options();
        assert_eq!(options.interval_ms, Some(250));
        assert_eq!(options.output.as_deref(), Some("~/out.md"));
    }

    #[test]
    fn test_subcommands_parse() {
        let args = Args::try_parse_from(["autotrans", "translate", "-b", "noop", "paper.txt"]).unwrap();
        let Some(Command::Translate { file, backend, .. }) = args.command else {
            panic!("expected translate");
        };
        assert_eq!(file, Some(PathBuf::from("paper.txt")));
        assert_eq!(backend, Some(BackendKind::Noop));

        let args = Args::try_parse_from(["autotrans", "credentials", "deepl", "-q"]).unwrap();
        assert!(args.quiet);
        assert!(matches!(
            args.command,
            Some(Command::Credentials {
                backend: BackendKind::Deepl
            })
        ));

        assert!(Args::try_parse_from(["autotrans", "credentials", "bing"]).is_err());
    }
}
