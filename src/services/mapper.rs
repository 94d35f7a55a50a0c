//! Native-to-custom category mapping.
//!
//! Walks the host's keymap tree depth-first and files every binding under
//! exactly one custom category name:
//! 1. the override table entry absorbing the native name, else
//! 2. for branch nodes, the override entry absorbing `"<name> (Global)"`, else
//! 3. the native name itself (suffixed with " (Global)" for branch nodes).
//!
//! Children never inherit their parent's resolved category.

use crate::models::{Binding, NativeCategory, NativeHierarchy, OverrideTable};
use std::collections::HashMap;
use tracing::debug;

/// Suffix of synthesized buckets holding a branch's own bindings.
pub const GLOBAL_SUFFIX: &str = " (Global)";

/// Bindings filed under one custom category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub category: String,
    /// Bindings in native traversal order
    pub bindings: Vec<Binding>,
}

/// Custom category name -> bindings, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBindingIndex {
    entries: Vec<IndexEntry>,
    lookup: HashMap<String, usize>,
}

impl CategoryBindingIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, category: &str, bindings: &[Binding]) {
        let idx = match self.lookup.get(category) {
            Some(idx) => *idx,
            None => {
                self.entries.push(IndexEntry {
                    category: category.to_string(),
                    bindings: Vec::new(),
                });
                self.lookup.insert(category.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[idx].bindings.extend_from_slice(bindings);
    }

    /// Bindings filed under `category`, empty if none.
    #[must_use]
    pub fn bindings(&self, category: &str) -> &[Binding] {
        self.lookup
            .get(category)
            .and_then(|idx| self.entries.get(*idx))
            .map_or(&[], |entry| entry.bindings.as_slice())
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.lookup.contains_key(category)
    }

    /// Entries in first-encounter order.
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Custom category names in first-encounter order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of bindings across all entries.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.bindings.len()).sum()
    }
}

/// Custom category name for a single native node.
#[must_use]
pub fn resolve_category(native: &NativeCategory, overrides: &OverrideTable) -> String {
    if let Some(category) = overrides.resolve(&native.name) {
        return category.to_string();
    }

    if native.has_children() {
        let global = format!("{}{GLOBAL_SUFFIX}", native.name);
        return overrides
            .resolve(&global)
            .map_or(global, ToString::to_string);
    }

    native.name.clone()
}

/// Files every native binding under one custom category.
///
/// Pure function of its inputs: the same snapshot and table always produce
/// the same index.
///
/// # Examples
///
/// ```
/// use hotkey_editor::models::{Binding, EventDescriptor, NativeCategory, NativeHierarchy, OverrideTable};
/// use hotkey_editor::services::mapper::map;
///
/// let native = NativeHierarchy::new(vec![NativeCategory::new("Mesh").with_bindings(vec![
///     Binding::new(1, "mesh.select_all", "Select All", EventDescriptor::key("A")),
/// ])]);
/// let overrides = OverrideTable::from_pairs([("Mesh Edit Mode", ["Mesh"])]);
///
/// let index = map(&native, &overrides);
/// assert_eq!(index.bindings("Mesh Edit Mode").len(), 1);
/// ```
#[must_use]
pub fn map(native: &NativeHierarchy, overrides: &OverrideTable) -> CategoryBindingIndex {
    let mut index = CategoryBindingIndex::new();

    native.walk(|node| {
        // Branches without direct bindings contribute no bucket
        if node.bindings.is_empty() {
            return;
        }
        let category = resolve_category(node, overrides);
        index.push(&category, &node.bindings);
    });

    debug!(
        entries = index.len(),
        bindings = index.binding_count(),
        "Mapped native keymaps onto custom categories"
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDescriptor;

    fn bindings(start: u32, count: u32) -> Vec<Binding> {
        (start..start + count)
            .map(|id| Binding::new(id, format!("op.{id}"), format!("Op {id}"), EventDescriptor::key("A")))
            .collect()
    }

    #[test]
    fn test_override_absorbs_native() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Mesh").with_bindings(bindings(0, 5))]);
        let overrides = OverrideTable::from_pairs([("Mesh Edit Mode", ["Mesh"])]);

        let index = map(&native, &overrides);
        assert_eq!(index.bindings("Mesh Edit Mode").len(), 5);
        assert!(!index.contains("Mesh"));
    }

    #[test]
    fn test_global_bucket_synthesized() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Image Editor")
            .with_bindings(bindings(0, 2))
            .with_children(vec![NativeCategory::new("UV Editor").with_bindings(bindings(10, 3))])]);

        let index = map(&native, &OverrideTable::new());
        assert_eq!(index.bindings("Image Editor (Global)").len(), 2);
        assert_eq!(index.bindings("UV Editor").len(), 3);
        assert!(!index.contains("Image Editor"));
    }

    #[test]
    fn test_global_bucket_override() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("3D View")
            .with_bindings(bindings(0, 1))
            .with_children(vec![NativeCategory::new("Object Mode")])]);
        let overrides = OverrideTable::from_pairs([("Viewport", ["3D View (Global)"])]);

        let index = map(&native, &overrides);
        assert_eq!(index.bindings("Viewport").len(), 1);
    }

    #[test]
    fn test_plain_override_beats_global_synthesis() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Window")
            .with_bindings(bindings(0, 1))
            .with_children(vec![NativeCategory::new("Screen")])]);
        let overrides = OverrideTable::from_pairs([
            ("Window Keys", vec!["Window"]),
            ("Other", vec!["Window (Global)"]),
        ]);

        let index = map(&native, &overrides);
        assert_eq!(index.bindings("Window Keys").len(), 1);
        assert!(!index.contains("Other"));
    }

    #[test]
    fn test_branch_without_direct_bindings_has_no_bucket() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Animation").with_children(vec![
            NativeCategory::new("Dopesheet").with_children(vec![
                NativeCategory::new("Dopesheet Generic").with_bindings(bindings(0, 2)),
            ]),
        ])]);

        let index = map(&native, &OverrideTable::new());
        assert!(!index.contains("Animation (Global)"));
        assert!(!index.contains("Dopesheet (Global)"));
        assert_eq!(index.bindings("Dopesheet Generic").len(), 2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_children_do_not_inherit_parent_category() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Mesh")
            .with_bindings(bindings(0, 1))
            .with_children(vec![NativeCategory::new("Knife").with_bindings(bindings(5, 1))])]);
        let overrides = OverrideTable::from_pairs([("Mesh Edit Mode", ["Mesh"])]);

        let index = map(&native, &overrides);
        assert_eq!(index.bindings("Mesh Edit Mode").len(), 1);
        assert_eq!(index.bindings("Knife").len(), 1);
    }

    #[test]
    fn test_order_and_merge_across_natives() {
        let native = NativeHierarchy::new(vec![
            NativeCategory::new("Object Mode").with_bindings(bindings(0, 2)),
            NativeCategory::new("Mesh").with_bindings(bindings(10, 1)),
            NativeCategory::new("Object Non-modal").with_bindings(bindings(20, 2)),
        ]);
        let overrides = OverrideTable::from_pairs([("Object", ["Object Mode", "Object Non-modal"])]);

        let index = map(&native, &overrides);
        let ids: Vec<u32> = index.bindings("Object").iter().map(|b| b.id.0).collect();
        assert_eq!(ids, vec![0, 1, 20, 21]);
        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["Object", "Mesh"]);
        assert_eq!(index.bindings("Mesh").len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let native = NativeHierarchy::new(vec![NativeCategory::new("Image Editor")
            .with_bindings(bindings(0, 2))
            .with_children(vec![NativeCategory::new("UV Editor").with_bindings(bindings(10, 3))])]);
        let overrides = OverrideTable::from_pairs([("UV", ["UV Editor"])]);
        assert_eq!(map(&native, &overrides), map(&native, &overrides));
    }

    #[test]
    fn test_empty_hierarchy() {
        let index = map(&NativeHierarchy::default(), &OverrideTable::new());
        assert!(index.is_empty());
        assert!(index.bindings("anything").is_empty());
    }
}
