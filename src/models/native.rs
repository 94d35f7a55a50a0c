//! Snapshot of the host's own keymap category tree.

use crate::models::Binding;
use serde::{Deserialize, Serialize};

/// One node of the host's category tree (a host "keymap").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCategory {
    /// Host keymap name (e.g. "Mesh", "Image Editor")
    pub name: String,
    /// Editor space the keymap applies to (e.g. "VIEW_3D")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
    /// Region within the space (e.g. "WINDOW")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_type: Option<String>,
    /// Bindings attached directly to this node
    #[serde(default)]
    pub bindings: Vec<Binding>,
    #[serde(default)]
    pub children: Vec<NativeCategory>,
}

impl NativeCategory {
    /// Creates an empty node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            space_type: None,
            region_type: None,
            bindings: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<Binding>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<NativeCategory>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_space(mut self, space_type: impl Into<String>, region_type: impl Into<String>) -> Self {
        self.space_type = Some(space_type.into());
        self.region_type = Some(region_type.into());
        self
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Point-in-time copy of the host's keymap forest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeHierarchy {
    pub categories: Vec<NativeCategory>,
}

impl NativeHierarchy {
    #[must_use]
    pub fn new(categories: Vec<NativeCategory>) -> Self {
        Self { categories }
    }

    /// Visits every node depth-first, parents before children.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a NativeCategory)) {
        let mut stack: Vec<&NativeCategory> = self.categories.iter().rev().collect();
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Total number of bindings across all nodes.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        let mut count = 0;
        self.walk(|node| count += node.bindings.len());
        count
    }
}
