//! Declarative description of the custom category hierarchy.
//!
//! A spec is an ordered list of nodes. Each node is either a bare leaf name
//! or a named branch whose `children` hold further nodes:
//!
//! ```yaml
//! - Window
//! - name: 3D View
//!   children:
//!     - Object Mode
//!     - Mesh Edit Mode
//! ```

use serde::{Deserialize, Serialize};

/// One node of a hierarchy spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HierarchyNode {
    /// Category without nested categories
    Leaf(String),
    /// Named category with an ordered list of nested nodes
    Branch {
        name: String,
        #[serde(default)]
        children: Vec<HierarchyNode>,
    },
}

impl HierarchyNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf(name.into())
    }

    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self::Branch {
            name: name.into(),
            children,
        }
    }

    /// Branch whose children are all plain leaves.
    #[must_use]
    pub fn list<I, S>(name: impl Into<String>, leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::branch(name, leaves.into_iter().map(|leaf| Self::leaf(leaf)).collect())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) | Self::Branch { name, .. } => name,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[HierarchyNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch { children, .. } => children,
        }
    }
}

/// Complete declarative hierarchy, roots in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchySpec {
    pub roots: Vec<HierarchyNode>,
}

impl HierarchySpec {
    #[must_use]
    pub fn new(roots: Vec<HierarchyNode>) -> Self {
        Self { roots }
    }

    /// Number of nodes in the whole spec.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&HierarchyNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}
