//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    file: String,
    exists: bool,
    paths: PathsOutput,
    filter: FilterOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    hierarchy: Option<String>,
    overrides: Option<String>,
}

#[derive(Serialize, Debug)]
struct FilterOutput {
    default_mode: String,
    aliases: BTreeMap<String, String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    show_inactive: bool,
    show_empty: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let file = Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}")))?;

        let output = ConfigOutput {
            file: file.to_string_lossy().to_string(),
            exists: file.exists(),
            paths: PathsOutput {
                hierarchy: config
                    .paths
                    .hierarchy
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                overrides: config
                    .paths
                    .overrides
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            },
            filter: FilterOutput {
                default_mode: format!("{:?}", config.filter.default_mode).to_lowercase(),
                aliases: config.filter.aliases.clone(),
            },
            ui: UiOutput {
                show_inactive: config.ui.show_inactive,
                show_empty: config.ui.show_empty,
            },
        };

        if self.json {
            return print_json(&output);
        }

        let exists = if output.exists { "" } else { " (not created, using defaults)" };
        println!("{APP_NAME} configuration");
        println!();
        println!("Config file: {}{exists}", output.file);
        println!();
        println!("Paths:");
        println!(
            "  Hierarchy: {}",
            output.paths.hierarchy.as_deref().unwrap_or("(built-in)")
        );
        println!(
            "  Overrides: {}",
            output.paths.overrides.as_deref().unwrap_or("(built-in)")
        );
        println!();
        println!("Filter:");
        println!("  Default mode: {}", output.filter.default_mode);
        if output.filter.aliases.is_empty() {
            println!("  Aliases: (none)");
        } else {
            println!("  Aliases:");
            for (token, code) in &output.filter.aliases {
                println!("    {token} -> {code}");
            }
        }
        println!();
        println!("UI:");
        println!("  Show inactive bindings: {}", output.ui.show_inactive);
        println!("  Show empty categories: {}", output.ui.show_empty);

        Ok(())
    }
}
