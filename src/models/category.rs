//! Custom category hierarchy.
//!
//! Categories live in a flat arena indexed by [`CategoryId`]. Each node keeps
//! a back-reference to its parent by id, which is only ever used to walk
//! towards the root. The arena is rebuilt wholesale from a
//! [`HierarchySpec`] and never patched in place.

use crate::models::{HierarchyNode, HierarchySpec};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a category inside its [`CategoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub usize);

/// A node of the custom hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name, unique among siblings
    pub name: String,
    /// Nesting depth, roots are 0
    pub level: usize,
    pub parent: Option<CategoryId>,
    pub has_children: bool,
    pub collapsed: bool,
    /// A binding shown under this node or a descendant conflicts with another one
    pub warning: bool,
}

impl Category {
    /// Validates a category name.
    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Category name cannot be empty");
        }

        Ok(())
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Forest of custom categories in depth-first declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    categories: Vec<Category>,
    children: Vec<Vec<CategoryId>>,
    roots: Vec<CategoryId>,
    /// (parent, name) -> id
    lookup: HashMap<(Option<CategoryId>, String), CategoryId>,
    /// name -> every node carrying that name
    by_name: HashMap<String, Vec<CategoryId>>,
}

impl CategoryTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh tree from a spec.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotkey_editor::models::{CategoryTree, HierarchyNode, HierarchySpec};
    ///
    /// let spec = HierarchySpec::new(vec![
    ///     HierarchyNode::leaf("Window"),
    ///     HierarchyNode::list("3D View", ["Object Mode", "Mesh Edit Mode"]),
    /// ]);
    /// let tree = CategoryTree::from_spec(&spec).unwrap();
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn from_spec(spec: &HierarchySpec) -> Result<Self> {
        let mut tree = Self::new();
        tree.build(spec)?;
        Ok(tree)
    }

    /// Replaces the whole tree with one built from `spec`.
    ///
    /// On error the tree is left empty.
    pub fn build(&mut self, spec: &HierarchySpec) -> Result<()> {
        self.clear();
        let mut built = Self::new();
        for node in &spec.roots {
            built.insert_node(node, None, 0)?;
        }
        *self = built;
        Ok(())
    }

    fn insert_node(
        &mut self,
        node: &HierarchyNode,
        parent: Option<CategoryId>,
        level: usize,
    ) -> Result<CategoryId> {
        let name = node.name();
        Category::validate_name(name)?;

        let key = (parent, name.to_string());
        if self.lookup.contains_key(&key) {
            let parent_name = parent.and_then(|p| self.get(p)).map_or("<root>", |c| c.name.as_str());
            anyhow::bail!("Duplicate category '{name}' under '{parent_name}'");
        }

        let id = CategoryId(self.categories.len());
        self.categories.push(Category {
            id,
            name: name.to_string(),
            level,
            parent,
            has_children: !node.children().is_empty(),
            collapsed: false,
            warning: false,
        });
        self.children.push(Vec::new());
        self.lookup.insert(key, id);
        self.by_name.entry(name.to_string()).or_default().push(id);

        match parent {
            Some(parent) => self.children[parent.0].push(id),
            None => self.roots.push(id),
        }

        for child in node.children() {
            self.insert_node(child, Some(id), level + 1)?;
        }

        Ok(id)
    }

    /// Removes every category.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.children.clear();
        self.roots.clear();
        self.lookup.clear();
        self.by_name.clear();
    }

    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0)
    }

    /// Finds the child called `name` under `parent` (`None` for roots).
    #[must_use]
    pub fn find(&self, parent: Option<CategoryId>, name: &str) -> Option<CategoryId> {
        self.lookup.get(&(parent, name.to_string())).copied()
    }

    /// All nodes carrying `name`, in declaration order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> &[CategoryId] {
        self.by_name.get(name).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Finds a node by its " > "-separated path, e.g. "3D View > Object Mode".
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<CategoryId> {
        path.split('>')
            .map(str::trim)
            .try_fold(None, |parent, name| self.find(parent, name).map(Some))
            .flatten()
    }

    #[must_use]
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    #[must_use]
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.children.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: CategoryId) -> impl Iterator<Item = &Category> + '_ {
        let mut next = self.get(id).and_then(|c| c.parent);
        std::iter::from_fn(move || {
            let category = self.get(next?)?;
            next = category.parent;
            Some(category)
        })
    }

    /// Names from the root down to `id`.
    #[must_use]
    pub fn path(&self, id: CategoryId) -> Vec<&str> {
        let mut path: Vec<&str> = self.ancestors(id).map(|c| c.name.as_str()).collect();
        path.reverse();
        if let Some(category) = self.get(id) {
            path.push(&category.name);
        }
        path
    }

    /// Path joined with " > ".
    #[must_use]
    pub fn display_path(&self, id: CategoryId) -> String {
        self.path(id).join(" > ")
    }

    /// All categories in depth-first declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sets the collapse flag of a single node. Returns false for unknown ids.
    pub fn set_collapsed(&mut self, id: CategoryId, collapsed: bool) -> bool {
        match self.categories.get_mut(id.0) {
            Some(category) => {
                category.collapsed = collapsed;
                true
            }
            None => false,
        }
    }

    /// Flips the collapse flag, returning the new state.
    pub fn toggle_collapsed(&mut self, id: CategoryId) -> Option<bool> {
        let category = self.categories.get_mut(id.0)?;
        category.collapsed = !category.collapsed;
        Some(category.collapsed)
    }

    /// Sets the collapse flag on every node.
    pub fn set_all_collapsed(&mut self, collapsed: bool) {
        for category in &mut self.categories {
            category.collapsed = collapsed;
        }
    }

    /// Flags `id` and every ancestor with a warning.
    pub fn mark_warning(&mut self, id: CategoryId) {
        let mut next = Some(id);
        while let Some(current) = next {
            let Some(category) = self.categories.get_mut(current.0) else {
                break;
            };
            if category.warning && current != id {
                // Ancestors above an already-flagged node are flagged too.
                break;
            }
            category.warning = true;
            next = category.parent;
        }
    }

    pub fn clear_warnings(&mut self) {
        for category in &mut self.categories {
            category.warning = false;
        }
    }
}
