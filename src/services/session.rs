//! Editor session state.
//!
//! An [`EditorSession`] owns everything one keymap editor needs: the custom
//! hierarchy spec and override table it was configured with, the category
//! tree, the binding index produced by the last mapping pass, and the active
//! filter. It is single-threaded; all mutation goes through `&mut self`.
//!
//! Edits are never applied to the snapshot directly. They are forwarded to
//! the host through [`KeymapHost`] and picked up by the next
//! [`EditorSession::refresh`].

use crate::keycode_db::EventTypeDb;
use crate::models::{
    Binding, BindingId, BindingTemplate, Category, CategoryId, CategoryTree, HierarchySpec,
    NativeHierarchy, OverrideTable,
};
use crate::services::conflicts::find_conflicts;
use crate::services::event_filter::ParseFailure;
use crate::services::mapper::{self, CategoryBindingIndex, GLOBAL_SUFFIX};
use crate::services::visibility::{self, Filter};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Binding storage owned by the host application.
///
/// The session only reads snapshots and issues requests; how the host stores
/// or persists bindings is its own business.
pub trait KeymapHost {
    /// Point-in-time copy of the host's keymap tree.
    fn snapshot(&self) -> Result<NativeHierarchy>;

    /// Creates a binding in the named native keymap.
    fn add_binding(&mut self, keymap: &str, template: &BindingTemplate) -> Result<BindingId>;

    /// Removes a binding.
    fn remove_binding(&mut self, id: BindingId) -> Result<()>;

    /// Restores a binding to the host's factory default.
    fn restore_binding(&mut self, id: BindingId) -> Result<()>;
}

/// Outcome of the last mapping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    /// Number of index entries
    pub categories: usize,
    /// Number of bindings mapped
    pub bindings: usize,
    /// Index keys with no node in the custom hierarchy
    pub unmapped: Vec<String>,
    /// Bindings sharing an event with another binding of the same keymap
    pub conflicts: BTreeSet<BindingId>,
}

/// A category row of the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub category: &'a Category,
    /// Empty when the category is collapsed
    pub bindings: Vec<&'a Binding>,
}

/// A binding matched by an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterHit<'a> {
    /// Custom category name the binding is filed under
    pub category: &'a str,
    pub binding: &'a Binding,
}

/// What the caller should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView<'a> {
    /// No filter text: visible categories with their bindings
    Tree(Vec<TreeRow<'a>>),
    /// Filter text present: matches across every category, ignoring collapse
    Filtered {
        /// Visible categories without bindings, kept navigable in name mode
        categories: Vec<&'a Category>,
        hits: Vec<FilterHit<'a>>,
        /// Set when the event filter could not be parsed
        failure: Option<ParseFailure>,
    },
}

impl SessionView<'_> {
    /// Number of bindings in the view.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        match self {
            Self::Tree(rows) => rows.iter().map(|row| row.bindings.len()).sum(),
            Self::Filtered { hits, .. } => hits.len(),
        }
    }
}

/// State of one keymap editor.
#[derive(Debug, Clone)]
pub struct EditorSession {
    spec: HierarchySpec,
    overrides: OverrideTable,
    event_types: EventTypeDb,
    tree: CategoryTree,
    /// `None` until the first mapping pass
    index: Option<CategoryBindingIndex>,
    report: MappingReport,
    filter: Filter,
}

impl EditorSession {
    /// Creates a session and builds the category tree.
    ///
    /// No bindings are available until [`Self::initialize`] runs.
    pub fn new(spec: HierarchySpec, overrides: OverrideTable, event_types: EventTypeDb) -> Result<Self> {
        let tree = CategoryTree::from_spec(&spec).context("Failed to build category hierarchy")?;
        Ok(Self {
            spec,
            overrides,
            event_types,
            tree,
            index: None,
            report: MappingReport::default(),
            filter: Filter::default(),
        })
    }

    /// Rebuilds tree and index from a host snapshot.
    ///
    /// Any previous index is discarded. Collapse state is reset.
    pub fn initialize(&mut self, native: &NativeHierarchy) -> Result<&MappingReport> {
        self.tree.build(&self.spec).context("Failed to build category hierarchy")?;

        let index = mapper::map(native, &self.overrides);
        let conflicts = find_conflicts(native);

        let unmapped: Vec<String> = index
            .categories()
            .filter(|name| !self.tree.contains_name(name))
            .map(ToString::to_string)
            .collect();
        for name in &unmapped {
            warn!(
                category = %name,
                bindings = index.bindings(name).len(),
                "Mapped category has no node in the hierarchy"
            );
        }

        for entry in index.entries() {
            if entry.bindings.iter().any(|b| conflicts.contains(&b.id)) {
                let nodes = self.tree.find_by_name(&entry.category).to_vec();
                for id in nodes {
                    self.tree.mark_warning(id);
                }
            }
        }

        self.report = MappingReport {
            categories: index.len(),
            bindings: index.binding_count(),
            unmapped,
            conflicts,
        };
        self.index = Some(index);

        info!(
            categories = self.report.categories,
            bindings = self.report.bindings,
            conflicts = self.report.conflicts.len(),
            "Keymap session initialized"
        );

        Ok(&self.report)
    }

    /// Takes a fresh snapshot from the host and reinitializes.
    pub fn refresh(&mut self, host: &dyn KeymapHost) -> Result<&MappingReport> {
        let native = host.snapshot().context("Failed to read keymaps from host")?;
        self.initialize(&native)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.index.is_some()
    }

    #[must_use]
    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// Index of the last mapping pass, `None` before initialization.
    #[must_use]
    pub fn index(&self) -> Option<&CategoryBindingIndex> {
        self.index.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> &MappingReport {
        &self.report
    }

    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    #[must_use]
    pub fn event_types(&self) -> &EventTypeDb {
        &self.event_types
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.filter.text.clear();
    }

    /// Collapses or expands one category.
    pub fn set_collapsed(&mut self, id: CategoryId, collapsed: bool) -> bool {
        self.tree.set_collapsed(id, collapsed)
    }

    /// Flips one category's collapse flag, returning the new state.
    pub fn toggle_collapsed(&mut self, id: CategoryId) -> Option<bool> {
        self.tree.toggle_collapsed(id)
    }

    /// Collapses or expands the whole tree.
    pub fn set_all_collapsed(&mut self, collapsed: bool) {
        self.tree.set_all_collapsed(collapsed);
    }

    /// Collapses every category carrying `name`. Returns how many matched.
    pub fn collapse_by_name(&mut self, name: &str) -> usize {
        let ids = self.tree.find_by_name(name).to_vec();
        for id in &ids {
            self.tree.set_collapsed(*id, true);
        }
        ids.len()
    }

    #[must_use]
    pub fn is_visible(&self, id: CategoryId) -> bool {
        visibility::is_visible(&self.tree, id)
    }

    /// Bindings presented by a category, unfiltered. Empty before initialization.
    #[must_use]
    pub fn bindings_for(&self, id: CategoryId) -> &[Binding] {
        match (self.index.as_ref(), self.tree.get(id)) {
            (Some(index), Some(category)) => index.bindings(&category.name),
            _ => &[],
        }
    }

    /// Bindings matching the active filter across all categories.
    ///
    /// With a blank filter every indexed binding is returned.
    #[must_use]
    pub fn filtered_bindings(&self) -> Vec<FilterHit<'_>> {
        let Some(index) = self.index.as_ref() else {
            return Vec::new();
        };
        let compiled = self.filter.compile(&self.event_types);
        index
            .entries()
            .iter()
            .flat_map(|entry| {
                entry.bindings.iter().map(move |binding| FilterHit {
                    category: entry.category.as_str(),
                    binding,
                })
            })
            .filter(|hit| compiled.matches(hit.binding))
            .collect()
    }

    /// Computes what to render for the current collapse state and filter.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        if self.filter.is_empty() {
            let rows = visibility::visible_categories(&self.tree)
                .into_iter()
                .filter_map(|id| self.tree.get(id))
                .map(|category| TreeRow {
                    category,
                    bindings: if category.collapsed {
                        Vec::new()
                    } else {
                        self.bindings_for(category.id).iter().collect()
                    },
                })
                .collect();
            return SessionView::Tree(rows);
        }

        let failure = self.filter.compile(&self.event_types).failure().cloned();
        let categories = match self.filter.mode {
            visibility::FilterMode::Name => visibility::visible_categories(&self.tree)
                .into_iter()
                .filter_map(|id| self.tree.get(id))
                .collect(),
            visibility::FilterMode::Event => Vec::new(),
        };

        SessionView::Filtered {
            categories,
            hits: self.filtered_bindings(),
            failure,
        }
    }

    /// Native keymap that new bindings for a custom category are created in.
    #[must_use]
    pub fn native_target(&self, category: &str) -> String {
        if let Some(native) = self.overrides.natives_for(category).first() {
            return native.clone();
        }
        category
            .strip_suffix(GLOBAL_SUFFIX)
            .unwrap_or(category)
            .to_string()
    }

    /// Asks the host to add a binding to the keymap behind `category`.
    pub fn add_binding(
        &self,
        host: &mut dyn KeymapHost,
        category: CategoryId,
        template: &BindingTemplate,
    ) -> Result<BindingId> {
        let name = self
            .tree
            .get(category)
            .map(|c| c.name.clone())
            .with_context(|| format!("Unknown category id {}", category.0))?;
        let keymap = self.native_target(&name);
        host.add_binding(&keymap, template)
            .with_context(|| format!("Failed to add '{}' to keymap '{keymap}'", template.idname))
    }

    /// Asks the host to remove a binding.
    pub fn remove_binding(&self, host: &mut dyn KeymapHost, id: BindingId) -> Result<()> {
        host.remove_binding(id)
            .with_context(|| format!("Failed to remove binding {id}"))
    }

    /// Asks the host to restore a binding to its default.
    pub fn restore_binding(&self, host: &mut dyn KeymapHost, id: BindingId) -> Result<()> {
        host.restore_binding(id)
            .with_context(|| format!("Failed to restore binding {id}"))
    }
}
