//! TodoCache CLI - Command-line interface
//!
//! This binary provides a command-line interface to the todocache library.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use crate::commands::demo;
use crate::error::CliError;

/// Cache-aside todo storage, demonstrated from the command line.
#[derive(Debug, Parser)]
#[command(name = "todocache", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scripted CRUD session and show how the cache behaves
    Demo {
        /// Disable the cache layer to show store-only degradation
        #[arg(long)]
        cache_off: bool,
    },
}

#[tokio::main]
async fn main() {
    todocache::logging::init("info");

    let cli = Cli::parse();
    let result: Result<(), CliError> = match cli.command {
        Command::Demo { cache_off } => demo::run(cache_off).await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
