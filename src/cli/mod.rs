//! CLI command handlers for the hotkey editor.
//!
//! This module provides headless, scriptable access to the category tree,
//! the native-to-custom mapping and the binding filters for automation,
//! testing, and CI integration.

pub mod common;
pub mod config;
pub mod filter;
pub mod keys;
pub mod map;
pub mod tree;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode, SessionArgs};
pub use config::ConfigArgs;
pub use filter::FilterArgs;
pub use keys::KeysArgs;
pub use map::MapArgs;
pub use tree::TreeArgs;
