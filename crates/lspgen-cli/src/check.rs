//! Check command: load and generate without writing

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::codegen;
use crate::config::Config;
use crate::generate::load_registry;

/// Check command implementation
pub fn run(inputs: &[PathBuf], config: &Config) -> Result<()> {
    for input in inputs {
        println!("Checking meta-model: {}", input.display());
    }

    let registry = load_registry(inputs)?;
    codegen::generate(&registry, &config.generator_options())
        .context("Failed to generate code")?;

    println!("✓ Version: {}", registry.version());
    println!("✓ Enumerations: {}", registry.enumerations().len());
    println!("✓ Structures: {}", registry.structures().len());
    println!("✓ Type aliases: {}", registry.type_aliases().len());
    println!("✓ Requests: {}", registry.requests().len());
    println!("✓ Notifications: {}", registry.notifications().len());

    println!("\nMeta-model is valid!");

    Ok(())
}
