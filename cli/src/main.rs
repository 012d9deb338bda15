//! SplitHash CLI
//!
//! Builds a SplitHash sequence from a file's lines and inspects it.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{build_and_report, chunk_file, concat_files, get_line, split_file};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "splithash")]
#[command(about = "Build and inspect SplitHash sequences", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a sequence from a file's lines and print its hash, size, height.
    Build {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Concatenate two files' sequences and print the resulting hash.
    Concat {
        #[arg(value_name = "FILE_A")]
        a: PathBuf,
        #[arg(value_name = "FILE_B")]
        b: PathBuf,
    },
    /// Split a file's sequence at a line index and print both halves' hashes.
    Split {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "INDEX")]
        index: i64,
    },
    /// Pack a file's sequence into its chunked form and confirm hash equality.
    Chunk {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Look up a single line by index in a file's sequence.
    Get {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "INDEX")]
        index: usize,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { file } => build_and_report(&file)?,
        Commands::Concat { a, b } => concat_files(&a, &b)?,
        Commands::Split { file, index } => split_file(&file, index)?,
        Commands::Chunk { file } => chunk_file(&file)?,
        Commands::Get { file, index } => get_line(&file, index)?,
    }

    Ok(())
}
