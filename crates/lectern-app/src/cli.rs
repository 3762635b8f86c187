use std::path::PathBuf;

use clap::Parser;

/// Lectern — search a text file and print its highlighted text layer.
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about)]
pub struct Args {
    /// Text file to lay out; every line becomes one fragment.
    pub file: PathBuf,

    /// Search query for the primary highlighter.
    #[arg(short = 'q', long)]
    pub query: String,

    /// Treat queries as regular expressions.
    #[arg(long)]
    pub regex: bool,

    /// Match case exactly.
    #[arg(long)]
    pub case_sensitive: bool,

    /// Second query, painted with the custom highlight class.
    #[arg(long)]
    pub custom: Option<String>,

    /// Select the Nth primary match (zero-based) instead of the first.
    #[arg(long)]
    pub select: Option<usize>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (tracing directive, e.g. `lectern=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
