//! Data models for bindings, native keymaps, and the custom category hierarchy.
//!
//! Models are plain data and hold no references into the host. Everything the
//! editor works with is a snapshot copied out of the host application.

pub mod binding;
pub mod category;
pub mod defaults;
pub mod hierarchy_spec;
pub mod native;
pub mod overrides;

// Re-export all model types
pub use binding::{Binding, BindingId, BindingTemplate, EventDescriptor, KeyValue, MapType, NONE_KEY};
pub use category::{Category, CategoryId, CategoryTree};
pub use hierarchy_spec::{HierarchyNode, HierarchySpec};
pub use native::{NativeCategory, NativeHierarchy};
pub use overrides::{OverrideEntry, OverrideTable};
