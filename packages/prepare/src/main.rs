#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for preparing the project feature file.
//!
//! `export` converts a raw OSM export into the project schema; `repair`
//! rebuilds every geometry as a square polygon.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use terrapulse_prepare::{export, repair};
use terrapulse_project::paths;

#[derive(Parser)]
#[command(name = "terrapulse_prepare", about = "Project feature file preparation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raw export into the project property schema
    Export {
        /// Raw export to read (defaults to `data/export.geojson`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output file (defaults to rewriting the input in place)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Rebuild every geometry as a square polygon, in place
    Repair {
        /// Feature file to repair (defaults to the project feature file)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { input, output } => {
            let input = input.unwrap_or_else(|| paths::data_dir().join("export.geojson"));
            let output = output.unwrap_or_else(|| input.clone());
            export::run(&input, &output)?;
        }
        Commands::Repair { path } => {
            let path = path.unwrap_or_else(paths::projects_path);
            repair::run(&path)?;
        }
    }

    Ok(())
}
