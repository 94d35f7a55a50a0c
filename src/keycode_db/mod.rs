//! Event-type vocabulary and key alias table.
//!
//! This module provides access to the embedded list of host event types
//! (keys, mouse buttons, NDOF buttons, ...), O(1) lookup by code, the curated
//! alias table used to turn free-text filter tokens into key codes, and
//! substring search over codes and display names.

use crate::models::MapType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Individual event type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeDefinition {
    /// Host event code (e.g. "A", "NUMPAD_PLUS", "LEFTMOUSE")
    pub code: String,
    /// Display name (e.g. "A", "Numpad +", "Left Mouse")
    pub name: String,
    /// Device class the event belongs to
    pub map_type: MapType,
}

/// Alias entry mapping a free-text token to an event code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAlias {
    /// Token as typed by the user (matched case-insensitively)
    pub token: String,
    /// Target event code
    pub code: String,
}

/// Database schema from event_types.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventTypeDatabase {
    version: String,
    event_types: Vec<EventTypeDefinition>,
    aliases: Vec<KeyAlias>,
}

/// Host event vocabulary with fast lookup and search capabilities.
///
/// The database is embedded in the binary at compile time. Aliases are kept
/// per instance so that independent sessions can carry different extra
/// aliases without sharing state.
#[derive(Debug, Clone)]
pub struct EventTypeDb {
    /// All event type definitions
    event_types: Vec<EventTypeDefinition>,
    /// Fast lookup by code
    lookup: HashMap<String, usize>,
    /// Uppercased token -> event code
    aliases: HashMap<String, String>,
}

impl EventTypeDb {
    /// Loads the vocabulary and built-in aliases from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("event_types.json");
        let db: EventTypeDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded event_types.json")?;

        let lookup = db
            .event_types
            .iter()
            .enumerate()
            .map(|(idx, event_type)| (event_type.code.clone(), idx))
            .collect();

        let mut this = Self {
            event_types: db.event_types,
            lookup,
            aliases: HashMap::new(),
        };

        // Bare digits name the numeric-pad keys, the top-row digits are
        // reachable through their codes (ONE, TWO, ...).
        let digit_aliases = (0..10).map(|digit| KeyAlias {
            token: digit.to_string(),
            code: format!("NUMPAD_{digit}"),
        });
        this.add_aliases(db.aliases.into_iter().chain(digit_aliases))?;

        Ok(this)
    }

    /// Returns a copy with extra aliases merged over the built-in ones.
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = KeyAlias>) -> Result<Self> {
        self.add_aliases(aliases)?;
        Ok(self)
    }

    fn add_aliases(&mut self, aliases: impl IntoIterator<Item = KeyAlias>) -> Result<()> {
        for alias in aliases {
            if alias.token.trim().is_empty() {
                anyhow::bail!("Key alias for '{}' has an empty token", alias.code);
            }
            if !self.is_valid(&alias.code) {
                anyhow::bail!(
                    "Key alias '{}' points at unknown event type '{}'",
                    alias.token,
                    alias.code
                );
            }
            self.aliases.insert(alias.token.to_uppercase(), alias.code);
        }
        Ok(())
    }

    /// Returns true if `code` names a known event type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotkey_editor::keycode_db::EventTypeDb;
    ///
    /// let db = EventTypeDb::load().unwrap();
    /// assert!(db.is_valid("A"));
    /// assert!(db.is_valid("NUMPAD_PLUS"));
    /// assert!(!db.is_valid("a"));
    /// ```
    #[must_use]
    pub fn is_valid(&self, code: &str) -> bool {
        self.lookup.contains_key(code)
    }

    /// Gets an event type definition by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&EventTypeDefinition> {
        let idx = self.lookup.get(code)?;
        self.event_types.get(*idx)
    }

    /// Looks up an alias token (case-insensitive).
    #[must_use]
    pub fn alias(&self, token: &str) -> Option<&str> {
        self.aliases.get(&token.to_uppercase()).map(String::as_str)
    }

    /// Codes whose code or display name contains `fragment` (case-insensitive).
    #[must_use]
    pub fn codes_containing(&self, fragment: &str) -> BTreeSet<String> {
        if fragment.is_empty() {
            return BTreeSet::new();
        }
        let fragment = fragment.to_uppercase();
        self.event_types
            .iter()
            .filter(|event_type| {
                event_type.code.contains(&fragment)
                    || event_type.name.to_uppercase().contains(&fragment)
            })
            .map(|event_type| event_type.code.clone())
            .collect()
    }

    /// Resolves a free-text token to its candidate event codes.
    ///
    /// Resolution stops at the first step producing candidates:
    /// exact code, then alias table, then substring match.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotkey_editor::keycode_db::EventTypeDb;
    ///
    /// let db = EventTypeDb::load().unwrap();
    /// assert!(db.resolve_token("a").contains("A"));
    /// assert!(db.resolve_token("+").contains("NUMPAD_PLUS"));
    /// assert_eq!(db.resolve_token("arrow").len(), 4);
    /// assert!(db.resolve_token("nonsense").is_empty());
    /// ```
    #[must_use]
    pub fn resolve_token(&self, token: &str) -> BTreeSet<String> {
        let upper = token.to_uppercase();

        if self.is_valid(&upper) {
            return BTreeSet::from([upper]);
        }

        if let Some(code) = self.alias(token) {
            return BTreeSet::from([code.to_string()]);
        }

        self.codes_containing(&upper)
    }

    /// Searches event types by code or name, best matches first.
    ///
    /// Exact matches rank above prefix matches, which rank above substring
    /// matches. An empty query returns the whole vocabulary.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&EventTypeDefinition> {
        if query.is_empty() {
            return self.event_types.iter().collect();
        }

        let query_upper = query.to_uppercase();
        let mut results: Vec<(&EventTypeDefinition, i32)> = self
            .event_types
            .iter()
            .filter_map(|event_type| {
                let name_upper = event_type.name.to_uppercase();

                if event_type.code == query_upper || name_upper == query_upper {
                    return Some((event_type, 100));
                }

                if event_type.code.starts_with(&query_upper) || name_upper.starts_with(&query_upper) {
                    return Some((event_type, 50));
                }

                if event_type.code.contains(&query_upper) || name_upper.contains(&query_upper) {
                    return Some((event_type, 10));
                }

                None
            })
            .collect();

        // Stable sort keeps vocabulary order within a relevance tier
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(event_type, _)| event_type).collect()
    }

    /// All event types of one device class.
    #[must_use]
    pub fn by_map_type(&self, map_type: MapType) -> Vec<&EventTypeDefinition> {
        self.event_types
            .iter()
            .filter(|event_type| event_type.map_type == map_type)
            .collect()
    }

    /// All event types in vocabulary order.
    #[must_use]
    pub fn event_types(&self) -> &[EventTypeDefinition] {
        &self.event_types
    }

    /// Gets the total number of event types.
    #[must_use]
    pub fn event_type_count(&self) -> usize {
        self.event_types.len()
    }

    /// Gets the total number of aliases.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}
