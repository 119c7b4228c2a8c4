use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compile django-style filter keys into document-store queries
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML config holding the document schemas
    #[arg(short, long, global = true, env = "QUERY_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write the output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// When to color terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Where the filters of a command come from
#[derive(Debug, Args)]
pub struct FilterSource {
    /// Document type the filters apply to
    #[arg(short, long)]
    pub document: String,

    /// JSON or JSON5 file with an object of filter keys to values
    pub file: Option<PathBuf>,

    /// Inline filter as KEY=VALUE, VALUE read as JSON5 (repeatable)
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile filters into a query document
    Compile {
        #[command(flatten)]
        source: FilterSource,

        /// Skip validation before compiling
        #[arg(long)]
        no_validate: bool,

        /// Print the query on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Check that every filter key is valid for the document
    Validate {
        #[command(flatten)]
        source: FilterSource,
    },
    /// List the operator suffixes a filter key can end with
    Operators,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
