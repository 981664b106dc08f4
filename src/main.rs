use anyhow::Result;
use clap::Parser;

use autotrans::cli::commands::translate::TranslateOptions;
use autotrans::cli::commands::{backends, credentials, sentences, translate, watch};
use autotrans::cli::{Args, Command};
use autotrans::config::InvalidConfig;
use autotrans::output::{self, OutputConfig};
use autotrans::ui::Style;
use autotrans::{logging, shutdown, status, warn};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    logging::init(args.verbose, output::is_no_color());

    if let Err(e) = run(args).await {
        warn!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Translate {
            file,
            backend,
            mode,
            output,
        }) => {
            let options = TranslateOptions {
                file,
                backend,
                mode,
                output,
            };
            let report = translate::run_translate(options).await?;
            if report.failed > 0 {
                warn!(
                    "{} {} sentence(s) could not be translated",
                    Style::warning("warning:"),
                    report.failed
                );
            }
            if report.interrupted {
                status!("\nBye.");
            }
        }
        Some(Command::Sentences { file }) => {
            sentences::print_sentences(file.as_deref(), args.verbose > 0)?;
        }
        Some(Command::Backends) => {
            backends::print_backends()?;
        }
        Some(Command::Credentials { backend }) => {
            credentials::run_credentials(backend)?;
        }
        None => {
            let summary = watch::run_watch(&args.watch, shutdown::on_ctrl_c()).await?;
            tracing::debug!(?summary, "watch finished");
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<InvalidConfig>()) {
        exitcode::CONFIG
    } else {
        exitcode::SOFTWARE
    }
}
