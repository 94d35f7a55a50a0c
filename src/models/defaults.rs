//! Built-in custom hierarchy and override table.
//!
//! Both are embedded in the binary and used whenever the configuration does
//! not point at user-supplied files.

use crate::models::{HierarchySpec, OverrideTable};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Schema of the embedded default_hierarchy.json.
#[derive(Debug, Deserialize)]
struct DefaultHierarchy {
    #[allow(dead_code)]
    version: String,
    hierarchy: HierarchySpec,
    overrides: OverrideTable,
}

fn load_embedded() -> Result<DefaultHierarchy> {
    let json_data = include_str!("default_hierarchy.json");
    serde_json::from_str(json_data).context("Failed to parse embedded default_hierarchy.json")
}

/// The built-in custom category hierarchy.
pub fn builtin_hierarchy() -> Result<HierarchySpec> {
    Ok(load_embedded()?.hierarchy)
}

/// The built-in override table.
pub fn builtin_overrides() -> Result<OverrideTable> {
    Ok(load_embedded()?.overrides)
}
