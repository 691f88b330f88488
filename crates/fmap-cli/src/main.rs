//! fmap CLI - feature-map generation for annotated TypeScript monorepos.
//!
//! Handles command-line argument parsing, logging initialization, and
//! command dispatch.

use clap::Parser;
use fmap_cli::{cli, commands, logger};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match args.command {
        cli::Command::Generate(generate_args) => commands::generate_execute(generate_args),
    }
}
