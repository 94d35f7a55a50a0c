//! Service layer for keymap business logic.
//!
//! This module contains the mapping, filtering and session services that sit
//! between the raw models and the command-line front end.

pub mod conflicts;
pub mod event_filter;
pub mod mapper;
pub mod session;
pub mod visibility;

// Re-export commonly used types and functions
pub use event_filter::{MatchSpec, Modifier, ParseFailure};
pub use mapper::{map, CategoryBindingIndex, IndexEntry};
pub use session::{EditorSession, FilterHit, KeymapHost, MappingReport, SessionView, TreeRow};
pub use visibility::{CompiledFilter, Filter, FilterMode};
