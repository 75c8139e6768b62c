use std::path::PathBuf;

use clap::{ArgAction, Parser};
use corpusprep_core::parse_vocab_cap;

#[derive(Parser, Debug)]
#[command(
    name = "corpusprep",
    author,
    version,
    about = "Tokenize a text corpus and build a frequency-ranked vocabulary",
    long_about = None
)]
pub struct Cli {
    /// Input sentence data
    pub input: PathBuf,

    /// Output sentence data
    pub output: PathBuf,

    /// Vocabulary file to save
    #[arg(long, value_name = "PATH")]
    pub vocab_file: Option<PathBuf>,

    /// Size of vocabulary file [default: 40000]
    #[arg(
        long,
        value_name = "SIZE",
        allow_hyphen_values = true,
        value_parser = parse_cap
    )]
    pub vocab_size: Option<usize>,

    /// Use lower case
    #[arg(long)]
    pub lower: bool,

    /// Write a JSON summary of the run
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// RON file with default settings
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Disable the line pre-count and progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Skip the line pre-count and show a spinner instead of a bar
    #[arg(long)]
    pub no_line_count: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,
}

fn parse_cap(raw: &str) -> Result<usize, String> {
    parse_vocab_cap(raw).map_err(|err| err.to_string())
}
