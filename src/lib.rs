//! Hotkey Editor Library
//!
//! This library provides the core of a keyboard shortcut editor: a custom
//! category hierarchy, the mapping of host keymaps onto it, event and name
//! filters, and per-category visibility.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod keycode_db;
pub mod models;
pub mod parser;
pub mod services;
