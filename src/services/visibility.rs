//! Category visibility and binding filters.
//!
//! A category is hidden when any of its ancestors is collapsed. Whole-tree
//! visibility is computed with one depth-first pass that skips collapsed
//! subtrees, so rendering never walks ancestor chains per node.
//!
//! Filters come in two modes:
//! - [`FilterMode::Name`]: case-insensitive substring on operator id or name
//! - [`FilterMode::Event`]: event descriptor match (see [`MatchSpec`])

use crate::keycode_db::EventTypeDb;
use crate::models::{Binding, CategoryId, CategoryTree};
use crate::services::event_filter::{MatchSpec, ParseFailure};
use serde::{Deserialize, Serialize};

/// How filter text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Match operator identifier or display name
    #[default]
    Name,
    /// Match key and modifier combinations, e.g. "ctrl shift a"
    Event,
}

/// Active filter as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub mode: FilterMode,
    pub text: String,
}

impl Filter {
    #[must_use]
    pub fn new(mode: FilterMode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(text: impl Into<String>) -> Self {
        Self::new(FilterMode::Name, text)
    }

    #[must_use]
    pub fn event(text: impl Into<String>) -> Self {
        Self::new(FilterMode::Event, text)
    }

    /// True when the filter text is blank and the full tree should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Prepares the filter for repeated evaluation.
    #[must_use]
    pub fn compile(&self, db: &EventTypeDb) -> CompiledFilter {
        if self.is_empty() {
            return CompiledFilter::All;
        }
        match self.mode {
            FilterMode::Name => CompiledFilter::Name(self.text.trim().to_lowercase()),
            FilterMode::Event => match MatchSpec::parse_text(&self.text, db) {
                Ok(spec) => CompiledFilter::Event(spec),
                Err(failure) => CompiledFilter::Nothing(failure),
            },
        }
    }
}

/// Binding predicate derived from a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledFilter {
    /// No filter text
    All,
    /// Lowercased name fragment
    Name(String),
    Event(MatchSpec),
    /// Event filter that cannot match anything
    Nothing(ParseFailure),
}

impl CompiledFilter {
    #[must_use]
    pub fn matches(&self, binding: &Binding) -> bool {
        match self {
            Self::All => true,
            Self::Name(fragment) => {
                binding.idname.to_lowercase().contains(fragment.as_str())
                    || binding.name.to_lowercase().contains(fragment.as_str())
            }
            Self::Event(spec) => spec.matches(&binding.event),
            Self::Nothing(_) => false,
        }
    }

    /// Parse failure to surface in the UI, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ParseFailure> {
        match self {
            Self::Nothing(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Returns true if no strict ancestor of `id` is collapsed.
///
/// Unknown ids are not visible.
#[must_use]
pub fn is_visible(tree: &CategoryTree, id: CategoryId) -> bool {
    tree.get(id).is_some() && tree.ancestors(id).all(|ancestor| !ancestor.collapsed)
}

/// Every visible category in depth-first display order.
///
/// A collapsed category is itself listed, its descendants are not.
#[must_use]
pub fn visible_categories(tree: &CategoryTree) -> Vec<CategoryId> {
    let mut visible = Vec::with_capacity(tree.len());
    let mut stack: Vec<CategoryId> = tree.roots().iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        visible.push(id);
        let expanded = tree.get(id).is_some_and(|category| !category.collapsed);
        if expanded {
            stack.extend(tree.children(id).iter().rev().copied());
        }
    }

    visible
}

/// Returns true if the bindings of `id` should be drawn in tree mode: the
/// category is visible and not collapsed itself.
#[must_use]
pub fn shows_bindings(tree: &CategoryTree, id: CategoryId) -> bool {
    is_visible(tree, id) && tree.get(id).is_some_and(|category| !category.collapsed)
}
