//! Saree Grace CLI - seed catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a seed catalog before pointing SAREE_SEED_FILE at it
//! saree-cli seed validate catalog.yaml
//!
//! # Write the built-in demo catalog out as a starting point
//! saree-cli seed generate -o catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `seed validate` - Parse and validate a YAML seed catalog
//! - `seed generate` - Emit the demo catalog as editable YAML

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its user on stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "saree-cli")]
#[command(author, version, about = "Saree Grace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage seed catalogs
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Parse and validate a YAML seed catalog
    Validate {
        /// Path to the seed catalog
        file: PathBuf,
    },
    /// Write the built-in demo catalog as YAML
    Generate {
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saree_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed { action } => match action {
            SeedAction::Validate { file } => commands::seed::validate(&file),
            SeedAction::Generate { output } => commands::seed::generate(output.as_deref()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
