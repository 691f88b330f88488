//! Command-line interface definition for fmap.
//!
//! Defined with clap v4's derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// fmap - feature-map generation for annotated TypeScript monorepos
#[derive(Parser, Debug)]
#[command(
    name = "fmap",
    version,
    about = "Generate a browsable feature map from JSDoc-annotated TypeScript sources",
    long_about = "fmap scans TypeScript/TSX sources for custom JSDoc annotations\n\
                  (@screen, @component, @serverAction, @module, @dbTable), augments them\n\
                  with AST-derived usage relationships, and emits a feature-map JSON\n\
                  artifact grouped by business feature."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available fmap subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the feature-map JSON artifact
    ///
    /// Collects TypeScript/TSX files under the project root, extracts
    /// annotations, analyzes import usage, and writes the merged feature map.
    Generate(GenerateArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project root to scan
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Path to tsconfig.json (defaults to <root>/tsconfig.json when present)
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Output path for the generated JSON
    #[arg(short, long, default_value = "feature-map.json", value_name = "FILE")]
    pub out: PathBuf,

    /// Configuration file (defaults to <root>/fmap.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
