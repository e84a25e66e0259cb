//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use bibcheck::DEFAULT_RMAX;

/// Search a citation index for papers which share references with a supplied
/// BibTeX bibliography file.
#[derive(Parser, Debug)]
#[command(name = "bibcheck")]
#[command(author, version, about)]
pub struct Args {
    /// The BibTeX (.bib) file to be parsed
    #[arg(value_name = "bibfile")]
    pub bibfile: PathBuf,

    /// Save output to file instead of standard output
    #[arg(short = 'o', value_name = "outfile")]
    pub outfile: Option<PathBuf>,

    /// Use cookies stored in file (Netscape format) for index queries
    #[arg(short = 'c', value_name = "cookie-file")]
    pub cookie_file: Option<PathBuf>,

    /// Max citation count per reference; more-cited references are not fetched
    #[arg(short = 'r', long = "rmax", value_name = "N", default_value_t = DEFAULT_RMAX)]
    pub rmax: usize,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and non-error logs
    #[arg(short, long)]
    pub quiet: bool,
}
