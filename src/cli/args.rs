//! Command line argument parsing for the scripture CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scripture - browse and search Bible translations
#[derive(Parser, Debug, Clone)]
#[command(name = "scripture")]
#[command(about = "Browse and search Bible translations stored as Zefania XML")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ScriptureArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// JSON configuration file
    #[arg(short, long, env = "SCRIPTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the translation files (overrides the configuration)
    #[arg(short, long, env = "SCRIPTURE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ScriptureArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the loaded translation ids
    Translations,

    /// List the books of a translation
    Books(BooksArgs),

    /// Print the verses of one chapter
    Chapter(ChapterArgs),

    /// Search a translation for verses containing every query token
    Search(SearchArgs),

    /// Load the data directory and report what was loaded or skipped
    Check,
}

/// Arguments for listing books
#[derive(Args, Debug, Clone)]
pub struct BooksArgs {
    /// Translation id
    #[arg(short, long)]
    pub translation: String,
}

/// Arguments for reading a chapter
#[derive(Args, Debug, Clone)]
pub struct ChapterArgs {
    /// Translation id
    #[arg(short, long)]
    pub translation: String,

    /// Book id, e.g. GEN
    #[arg(short, long)]
    pub book: String,

    /// Chapter number
    #[arg(short, long)]
    pub chapter: u32,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Translation id
    #[arg(short, long)]
    pub translation: String,

    /// Query text
    #[arg(short, long)]
    pub query: String,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
