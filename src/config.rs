//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::keycode_db::{EventTypeDb, KeyAlias};
use crate::models::{defaults, HierarchySpec, OverrideTable};
use crate::parser::{load_hierarchy_spec, load_override_table};
use crate::services::FilterMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Custom hierarchy file (json, json5, yaml or toml). Built-in when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<PathBuf>,
    /// Override table file. Built-in when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<PathBuf>,
}

/// Filter behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    /// Mode used when none is given on the command line
    #[serde(default)]
    pub default_mode: FilterMode,
    /// Extra key aliases, token -> event code (e.g. "tab" = "TAB")
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// List inactive bindings in tree and filter output
    #[serde(default = "default_true")]
    pub show_inactive: bool,
    /// List categories that have no bindings
    #[serde(default = "default_true")]
    pub show_empty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_inactive: true,
            show_empty: true,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/HotkeyEditor/config.toml`
/// - macOS: `~/Library/Application Support/HotkeyEditor/config.toml`
/// - Windows: `%APPDATA%\HotkeyEditor\config.toml`
///
/// The directory can be redirected with the `HOTKEY_EDITOR_CONFIG_DIR`
/// environment variable.
///
/// # Validation
///
/// - `hierarchy` and `overrides` paths must exist when set
/// - alias tokens must be non-empty and contain no whitespace
/// - alias codes must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Filter settings
    #[serde(default)]
    pub filter: FilterConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/HotkeyEditor/`
    /// - macOS: `~/Library/Application Support/HotkeyEditor/`
    /// - Windows: `%APPDATA%\HotkeyEditor\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("Hierarchy", &self.paths.hierarchy),
            ("Override", &self.paths.overrides),
        ] {
            if let Some(path) = path {
                if !path.is_file() {
                    anyhow::bail!("{label} file does not exist: {}", path.display());
                }
            }
        }

        for (token, code) in &self.filter.aliases {
            if token.trim().is_empty() || token.chars().any(char::is_whitespace) {
                anyhow::bail!("Invalid alias token '{token}': must be a single non-empty word");
            }
            if code.trim().is_empty() {
                anyhow::bail!("Alias '{token}' has an empty event code");
            }
        }

        Ok(())
    }

    /// Hierarchy spec from the configured file, or the built-in one.
    pub fn hierarchy_spec(&self) -> Result<HierarchySpec> {
        match &self.paths.hierarchy {
            Some(path) => load_hierarchy_spec(path),
            None => defaults::builtin_hierarchy(),
        }
    }

    /// Override table from the configured file, or the built-in one.
    pub fn override_table(&self) -> Result<OverrideTable> {
        match &self.paths.overrides {
            Some(path) => load_override_table(path),
            None => defaults::builtin_overrides(),
        }
    }

    /// Event vocabulary extended with the configured aliases.
    ///
    /// # Errors
    ///
    /// Fails if an alias targets an unknown event code.
    pub fn event_types(&self) -> Result<EventTypeDb> {
        let aliases = self.filter.aliases.iter().map(|(token, code)| KeyAlias {
            token: token.clone(),
            code: code.to_uppercase(),
        });

        EventTypeDb::load()?
            .with_aliases(aliases)
            .context("Invalid alias in configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.hierarchy, None);
        assert_eq!(config.paths.overrides, None);
        assert_eq!(config.filter.default_mode, FilterMode::Name);
        assert!(config.filter.aliases.is_empty());
        assert!(config.ui.show_inactive);
        assert!(config.ui.show_empty);
    }

    #[test]
    fn test_config_validate() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_config_validate_paths() {
        let temp_dir = TempDir::new().unwrap();
        let hierarchy = temp_dir.path().join("hierarchy.json");

        let mut config = Config::new();
        config.paths.hierarchy = Some(hierarchy.clone());
        assert!(config.validate().is_err());

        fs::write(&hierarchy, "[\"Window\"]").unwrap();
        assert!(config.validate().is_ok());

        config.paths.overrides = Some(temp_dir.path().to_path_buf());
        assert!(config.validate().is_err(), "directories are not override files");
    }

    #[test]
    fn test_config_validate_aliases() {
        let mut config = Config::new();
        config.filter.aliases.insert("tab".to_string(), "TAB".to_string());
        assert!(config.validate().is_ok());

        config.filter.aliases.insert("page up".to_string(), "PAGE_UP".to_string());
        assert!(config.validate().is_err());

        config.filter.aliases.clear();
        config.filter.aliases.insert("x".to_string(), " ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.filter.default_mode = FilterMode::Event;
        config.filter.aliases.insert("tab".to_string(), "TAB".to_string());
        config.ui.show_empty = false;
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[filter]\ndefault_mode = \"event\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.filter.default_mode, FilterMode::Event);
        assert!(loaded.ui.show_inactive);
    }

    #[test]
    fn test_builtin_sources() {
        let config = Config::new();
        assert!(config.hierarchy_spec().unwrap().node_count() > 0);
        assert!(!config.override_table().unwrap().is_empty());
    }

    #[test]
    fn test_event_types_with_aliases() {
        let mut config = Config::new();
        config.filter.aliases.insert("tabby".to_string(), "tab".to_string());
        let db = config.event_types().unwrap();
        assert_eq!(db.alias("TABBY"), Some("TAB"));

        config.filter.aliases.insert("bogus".to_string(), "NOT_A_KEY".to_string());
        assert!(config.event_types().is_err());
    }
}
