//! lspgen.toml parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

use crate::codegen::DEFAULT_RUNTIME_CRATE;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "lspgen.toml";

/// lspgen.toml structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Directory the three artifacts are written to
    pub directory: PathBuf,
    pub types: String,
    pub serialization: String,
    pub messages: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSection {
    /// Path of the runtime crate in generated `use` lines
    pub crate_path: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputSection::default(),
            runtime: RuntimeSection::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            types: "types.rs".to_string(),
            serialization: "serialization.rs".to_string(),
            messages: "messages.rs".to_string(),
        }
    }
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            crate_path: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

impl Config {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse config from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Explicit path, else `lspgen.toml` in the working directory, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        for (key, file) in [
            ("output.types", &self.output.types),
            ("output.serialization", &self.output.serialization),
            ("output.messages", &self.output.messages),
        ] {
            if file.is_empty() {
                anyhow::bail!("{} cannot be empty", key);
            }
        }

        if !is_valid_crate_path(&self.runtime.crate_path) {
            anyhow::bail!("Invalid runtime crate path: '{}'", self.runtime.crate_path);
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            anyhow::bail!("Invalid log level: '{}'", self.log_level);
        }

        Ok(())
    }

    /// Generator options derived from this config
    pub fn generator_options(&self) -> crate::codegen::GeneratorOptions {
        crate::codegen::GeneratorOptions {
            runtime_crate: self.runtime.crate_path.clone(),
        }
    }
}

/// `a::b::c` where every segment is an identifier; a leading `::` is allowed.
fn is_valid_crate_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);

    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && segment != "_"
        })
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
