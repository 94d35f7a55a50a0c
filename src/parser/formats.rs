//! Structured file formats accepted for configuration and snapshots.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Json5,
    Yaml,
    Toml,
}

impl Format {
    /// Detects the format of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .with_context(|| format!("File has no extension: {}", path.display()))?;

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "json5" => Ok(Self::Json5),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => anyhow::bail!(
                "Unsupported file extension '.{other}' for {} (expected json, json5, yaml, yml or toml)",
                path.display()
            ),
        }
    }

    /// Deserializes `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        let value = match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Json5 => json5::from_str(content)?,
            Self::Yaml => serde_yml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}

/// Reads and deserializes a file, choosing the format by extension.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;

    let content = fs::read_to_string(path)
        .context(format!("Failed to read file: {}", path.display()))?;

    format
        .parse(&content)
        .context(format!("Failed to parse file: {}", path.display()))
}
