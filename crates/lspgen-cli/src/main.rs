//! lspgen CLI - LSP meta-model code generator
//!
//! Commands:
//! - `lspgen generate` - Generate Rust types, serialization and message contracts
//! - `lspgen check` - Load meta-model files and run generation without writing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod codegen;
mod config;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "lspgen")]
#[command(author, version, about = "Code generator for the LSP meta-model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust sources from one or more meta-model files
    Generate {
        /// Meta-model JSON files, merged in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Path to lspgen.toml (default: ./lspgen.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Runtime crate path used in generated `use` lines
        #[arg(short, long)]
        runtime_crate: Option<String>,

        /// Increase log verbosity (-v info, -vv debug)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Validate meta-model files without writing anything
    Check {
        /// Meta-model JSON files, merged in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Increase log verbosity (-v info, -vv debug)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            inputs,
            config,
            output_dir,
            runtime_crate,
            verbose,
        } => {
            let mut config = config::Config::load(config.as_deref())?;
            if let Some(directory) = output_dir {
                config.output.directory = directory;
            }
            if let Some(crate_path) = runtime_crate {
                config.runtime.crate_path = crate_path;
            }
            config.validate()?;

            logging::init_logging(&logging::filter_directive(verbose, &config.log_level));
            generate::run(&inputs, &config)?;
        }
        Commands::Check { inputs, verbose } => {
            // lspgen.toml only configures generate
            let config = config::Config::default();

            logging::init_logging(&logging::filter_directive(verbose, &config.log_level));
            check::run(&inputs, &config)?;
        }
    }

    Ok(())
}
