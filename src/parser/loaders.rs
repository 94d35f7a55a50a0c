//! Loaders for host snapshots, hierarchy specs and override tables.
//!
//! Hierarchy and override files may hold the bare list or wrap it in a
//! top-level key (`hierarchy = [...]`, `[[override]]`), which TOML requires.

use crate::models::{HierarchySpec, NativeHierarchy, OverrideTable};
use crate::parser::formats::read_structured;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HierarchyFile {
    Bare(HierarchySpec),
    Wrapped { hierarchy: HierarchySpec },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OverridesFile {
    Bare(OverrideTable),
    Wrapped {
        #[serde(rename = "override", alias = "overrides")]
        overrides: OverrideTable,
    },
}

/// Loads a host keymap snapshot.
pub fn load_native_snapshot(path: &Path) -> Result<NativeHierarchy> {
    read_structured(path)
}

/// Loads a custom hierarchy spec.
pub fn load_hierarchy_spec(path: &Path) -> Result<HierarchySpec> {
    Ok(match read_structured(path)? {
        HierarchyFile::Bare(spec) | HierarchyFile::Wrapped { hierarchy: spec } => spec,
    })
}

/// Loads an override table.
pub fn load_override_table(path: &Path) -> Result<OverrideTable> {
    Ok(match read_structured(path)? {
        OverridesFile::Bare(table) | OverridesFile::Wrapped { overrides: table } => table,
    })
}
