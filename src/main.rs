//! CLI entry point for the bibcheck tool.

use std::io::{self, IsTerminal};

use anyhow::Result;
use bibcheck::{
    BibChecker, ConsoleProgress, Progress, ScholarClient, SilentProgress, load_bibliography,
    load_cookie_jar, report,
};
use clap::Parser;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; print-mode results own stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut references = load_bibliography(&args.bibfile)?;
    info!(
        entries = references.len(),
        file = %args.bibfile.display(),
        "Loaded bibliography"
    );

    let cookie_jar = match &args.cookie_file {
        Some(path) => {
            let jar = load_cookie_jar(path)?;
            debug!(file = %path.display(), "Cookie file loaded");
            Some(jar)
        }
        None => None,
    };

    let client = ScholarClient::new(cookie_jar)?;

    // Progress lines overwrite in place on a terminal; suppress them otherwise
    // so piped stderr stays readable.
    let progress: Box<dyn Progress> = if args.quiet || !io::stderr().is_terminal() {
        Box::new(SilentProgress)
    } else {
        Box::new(ConsoleProgress::new())
    };

    let mut checker = BibChecker::new(Box::new(client), args.rmax, progress);
    let tally = checker.run(&mut references).await?;

    match &args.outfile {
        Some(path) => {
            report::save_results(&tally, path)?;
            info!(file = %path.display(), "Results saved");
        }
        None => {
            report::print_results(&tally, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}
