//! Explicit custom-category to native-category assignments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One override rule: a custom category and the native categories it absorbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Custom category name (e.g. "Mesh Edit Mode")
    pub category: String,
    /// Native category names whose direct bindings land in `category`
    pub absorbs: Vec<String>,
}

/// Ordered override table.
///
/// When a native name appears under several entries the first entry wins.
/// The table is static configuration and is never mutated by the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OverrideEntry>", into = "Vec<OverrideEntry>")]
pub struct OverrideTable {
    entries: Vec<OverrideEntry>,
    /// native name -> index of the first entry absorbing it
    reverse: HashMap<String, usize>,
}

impl From<Vec<OverrideEntry>> for OverrideTable {
    fn from(entries: Vec<OverrideEntry>) -> Self {
        let mut reverse = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for native in &entry.absorbs {
                reverse.entry(native.clone()).or_insert(idx);
            }
        }
        Self { entries, reverse }
    }
}

impl From<OverrideTable> for Vec<OverrideEntry> {
    fn from(table: OverrideTable) -> Self {
        table.entries
    }
}

impl OverrideTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(custom, [native, ...])` pairs, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotkey_editor::models::OverrideTable;
    ///
    /// let table = OverrideTable::from_pairs([("Mesh Edit Mode", ["Mesh"])]);
    /// assert_eq!(table.resolve("Mesh"), Some("Mesh Edit Mode"));
    /// assert_eq!(table.resolve("Curve"), None);
    /// ```
    #[must_use]
    pub fn from_pairs<I, C, N, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(category, absorbs)| OverrideEntry {
                category: category.into(),
                absorbs: absorbs.into_iter().map(Into::into).collect(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Custom category absorbing the given native name, if any.
    #[must_use]
    pub fn resolve(&self, native: &str) -> Option<&str> {
        let idx = self.reverse.get(native)?;
        self.entries.get(*idx).map(|entry| entry.category.as_str())
    }

    /// Native names absorbed by a custom category, in declaration order.
    #[must_use]
    pub fn natives_for(&self, category: &str) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map_or(&[], |entry| entry.absorbs.as_slice())
    }

    #[must_use]
    pub fn entries(&self) -> &[OverrideEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
