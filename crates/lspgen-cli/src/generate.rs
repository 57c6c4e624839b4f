//! Meta-model loading and artifact writing

use anyhow::{Context, Result};
use lspgen_core::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codegen::{self, GeneratedFiles};
use crate::config::{Config, OutputSection};

/// Extract every input file into one registry, in order.
///
/// Later files overwrite the version; a mismatch is logged, not rejected.
pub fn load_registry(inputs: &[PathBuf]) -> Result<Registry> {
    let mut registry = Registry::new();
    let mut first_version: Option<String> = None;

    for input in inputs {
        let content = fs::read_to_string(input)
            .with_context(|| format!("Failed to read meta-model: {}", input.display()))?;

        registry
            .extract_str(&content)
            .with_context(|| format!("Failed to load meta-model: {}", input.display()))?;

        info!(path = %input.display(), version = registry.version(), "Loaded meta-model");

        match &first_version {
            None => first_version = Some(registry.version().to_string()),
            Some(first) if first != registry.version() => {
                warn!(
                    path = %input.display(),
                    expected = %first,
                    found = registry.version(),
                    "Meta-model version differs from earlier input"
                );
            }
            Some(_) => {}
        }
    }

    Ok(registry)
}

/// Write the three artifacts, creating the output directory.
pub fn write_artifacts(files: &GeneratedFiles, output: &OutputSection) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&output.directory).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output.directory.display()
        )
    })?;

    let mut written = Vec::with_capacity(3);
    for (name, content) in [
        (&output.types, &files.types),
        (&output.serialization, &files.serialization),
        (&output.messages, &files.messages),
    ] {
        let path = output.directory.join(name);
        write_file(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Generate command implementation
pub fn run(inputs: &[PathBuf], config: &Config) -> Result<()> {
    let registry = load_registry(inputs)?;

    let files = codegen::generate(&registry, &config.generator_options())
        .context("Failed to generate code")?;

    let written = write_artifacts(&files, &config.output)?;

    println!(
        "Generated {} files from meta-model {} in {}",
        written.len(),
        registry.version(),
        config.output.directory.display()
    );

    Ok(())
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
