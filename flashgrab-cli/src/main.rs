// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Flashgrab CLI - turn paginated flashcard pages into spreadsheets.
//!
//! # Examples
//!
//! ```bash
//! # Extract every page of a deck
//! flashgrab extract https://site.com/123-sample-page
//!
//! # Write to a specific directory and keep at most 5 files
//! flashgrab --dir ./decks --max-files 5 extract https://site.com/deck
//!
//! # List and delete artifacts
//! flashgrab list
//! flashgrab delete samplepage_3f9a01c2.xlsx
//!
//! # Remove expired artifacts
//! flashgrab sweep
//!
//! # JSON output
//! flashgrab --format json --pretty list
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flashgrab_store::ExtractionError;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{artifacts, config, extract};

// ============================================================================
// CLI Definition
// ============================================================================

/// Flashgrab CLI - flashcard extraction.
#[derive(Parser)]
#[command(name = "flashgrab")]
#[command(about = "Extract paginated flashcards into spreadsheets")]
#[command(long_about = r"
Flashgrab walks ?page=1, ?page=2, ... of a flashcard page, collects every
question/answer pair and writes them to an .xlsx file with Question,
Options and Answer columns.

Artifacts are kept for a limited time (24 hours by default) and only the
newest ones are retained (10 by default).

Examples:
  flashgrab extract https://site.com/deck   # Build a spreadsheet
  flashgrab list                            # Show stored spreadsheets
  flashgrab delete deck_0a1b2c3d.xlsx       # Remove one
  flashgrab sweep                           # Remove expired ones
")]
#[command(version)]
#[command(author = "Flashgrab Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Artifact directory (overrides the settings file).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Maximum number of artifacts kept (overrides the settings file).
    #[arg(long, global = true)]
    pub max_files: Option<usize>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract all flashcards from a URL into a spreadsheet.
    #[command(visible_alias = "x")]
    Extract(extract::ExtractArgs),

    /// List stored spreadsheets, newest first.
    #[command(visible_alias = "ls")]
    List,

    /// Delete a stored spreadsheet.
    #[command(visible_alias = "rm")]
    Delete {
        /// File name as shown by `list`.
        name: String,
    },

    /// Resolve a stored spreadsheet to its full path.
    Path {
        /// File name as shown by `list`.
        name: String,
    },

    /// Remove expired spreadsheets and enforce the cap.
    Sweep,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Bad URL or artifact name.
    InvalidInput = 2,
    /// The requested artifact does not exist.
    NotFound = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ExtractionError>() {
            Some(ExtractionError::InvalidUrl(_)) => ExitCode::InvalidInput,
            _ if error.downcast_ref::<commands::NotFound>().is_some() => ExitCode::NotFound,
            _ => match error.downcast_ref::<flashgrab_store::StoreError>() {
                Some(flashgrab_store::StoreError::InvalidName(_)) => ExitCode::InvalidInput,
                _ => ExitCode::Error,
            },
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("flashgrab=debug,info")
    } else {
        EnvFilter::new("flashgrab=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Extract(args) => extract::run(args, &cli).await,
        Commands::List => artifacts::list(&cli).await,
        Commands::Delete { name } => artifacts::delete(name, &cli).await,
        Commands::Path { name } => artifacts::path(name, &cli).await,
        Commands::Sweep => artifacts::sweep(&cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
