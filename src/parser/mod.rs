//! Parsing for host snapshots and declarative configuration files.
//!
//! This module handles reading native keymap snapshots, custom hierarchy
//! specs and override tables from JSON, JSON5, YAML or TOML files.

pub mod formats;
pub mod loaders;

// Re-export commonly used functions
pub use formats::{read_structured, Format};
pub use loaders::{load_hierarchy_spec, load_native_snapshot, load_override_table};
