//! Shared CLI plumbing: error type, exit codes and session loading.

use crate::config::Config;
use crate::models::Binding;
use crate::parser::{load_hierarchy_spec, load_native_snapshot, load_override_table};
use crate::services::{EditorSession, MappingReport};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Bad input or invalid configuration
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Error returned by command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Io(String),
}

impl CliError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::Validation,
            Self::Io(_) => ExitCode::Io,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Prints any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Inputs needed to build an editor session.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Host keymap snapshot (json, json5, yaml or toml)
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Custom hierarchy file, overrides the configured one
    #[arg(long, value_name = "FILE")]
    pub hierarchy: Option<PathBuf>,

    /// Override table file, overrides the configured one
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,
}

/// A loaded and initialized session together with the config it came from.
pub struct LoadedSession {
    pub config: Config,
    pub session: EditorSession,
}

impl SessionArgs {
    /// Loads config, hierarchy, overrides and snapshot, and runs the first
    /// mapping pass.
    pub fn load(&self) -> CliResult<LoadedSession> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let spec = match &self.hierarchy {
            Some(path) => load_hierarchy_spec(path),
            None => config.hierarchy_spec(),
        }
        .map_err(|e| CliError::io(format!("Failed to load hierarchy: {e:#}")))?;

        let overrides = match &self.overrides {
            Some(path) => load_override_table(path),
            None => config.override_table(),
        }
        .map_err(|e| CliError::io(format!("Failed to load override table: {e:#}")))?;

        let event_types = config
            .event_types()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let native = load_native_snapshot(&self.snapshot)
            .map_err(|e| CliError::io(format!("Failed to load snapshot: {e:#}")))?;

        let mut session = EditorSession::new(spec, overrides, event_types)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        session
            .initialize(&native)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        Ok(LoadedSession { config, session })
    }
}

/// JSON shape of one binding.
#[derive(Debug, Serialize)]
pub struct BindingOutput {
    pub id: u32,
    pub idname: String,
    pub name: String,
    pub event: String,
    pub active: bool,
    pub conflict: bool,
}

impl BindingOutput {
    #[must_use]
    pub fn new(binding: &Binding, report: &MappingReport) -> Self {
        Self {
            id: binding.id.0,
            idname: binding.idname.clone(),
            name: binding.name.clone(),
            event: binding.event.to_string(),
            active: binding.active,
            conflict: report.conflicts.contains(&binding.id),
        }
    }
}

/// One human-readable binding line.
#[must_use]
pub fn format_binding(binding: &Binding, report: &MappingReport) -> String {
    let mut line = format!("{:<24} {}", binding.event.to_string(), binding.label());
    if binding.label() != binding.idname {
        line.push_str(&format!(" ({})", binding.idname));
    }
    if !binding.active {
        line.push_str(" [inactive]");
    }
    if report.conflicts.contains(&binding.id) {
        line.push_str(" [conflict]");
    }
    line
}
