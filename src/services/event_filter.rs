//! Event-descriptor filter parsing and matching.
//!
//! Turns free-text filter input such as `"ctrl shift a"` into a [`MatchSpec`]
//! of modifier and key constraints, then tests bindings against it:
//! - modifier tokens (`ctrl`, `alt`, `shift`, `cmd`/`oskey`, `any`) require
//!   the matching flag to be set
//! - every other token becomes a set of candidate key codes, and the
//!   binding's key must be in each of those sets

use crate::keycode_db::EventTypeDb;
use crate::models::EventDescriptor;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Modifier flag of an event descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    OsKey,
    Any,
}

impl Modifier {
    /// Parses a modifier token (case-insensitive).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" => Some(Self::Ctrl),
            "alt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "cmd" | "oskey" => Some(Self::OsKey),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Reads this modifier's flag from an event.
    #[must_use]
    pub const fn is_set(self, event: &EventDescriptor) -> bool {
        match self {
            Self::Ctrl => event.ctrl,
            Self::Alt => event.alt,
            Self::Shift => event.shift,
            Self::OsKey => event.oskey,
            Self::Any => event.any,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::OsKey => "oskey",
            Self::Any => "any",
        };
        write!(f, "{name}")
    }
}

/// Reasons an event filter cannot match anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// A key token resolved to no event code at all
    #[error("no key matches '{token}'")]
    UnknownKey { token: String },
}

/// Structured constraints parsed from an event filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSpec {
    /// Flags that must be set on the event
    modifiers: BTreeSet<Modifier>,
    /// One candidate set per key token, smallest first
    key_sets: Vec<BTreeSet<String>>,
}

impl MatchSpec {
    /// Parses a token sequence against the event vocabulary.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotkey_editor::keycode_db::EventTypeDb;
    /// use hotkey_editor::models::EventDescriptor;
    /// use hotkey_editor::services::event_filter::MatchSpec;
    ///
    /// let db = EventTypeDb::load().unwrap();
    /// let spec = MatchSpec::parse(&["ctrl", "shift", "a"], &db).unwrap();
    ///
    /// assert!(spec.matches(&EventDescriptor::key("A").with_ctrl().with_shift()));
    /// assert!(!spec.matches(&EventDescriptor::key("A").with_ctrl()));
    /// ```
    pub fn parse<S: AsRef<str>>(tokens: &[S], db: &EventTypeDb) -> Result<Self, ParseFailure> {
        let mut spec = Self::default();

        for token in tokens.iter().map(AsRef::as_ref) {
            if let Some(modifier) = Modifier::from_token(token) {
                spec.modifiers.insert(modifier);
                continue;
            }

            let candidates = db.resolve_token(token);
            if candidates.is_empty() {
                return Err(ParseFailure::UnknownKey {
                    token: token.to_string(),
                });
            }
            spec.key_sets.push(candidates);
        }

        // Fail fast on the most selective constraint
        spec.key_sets.sort_by_key(BTreeSet::len);

        Ok(spec)
    }

    /// Splits free text on whitespace and parses it.
    pub fn parse_text(text: &str, db: &EventTypeDb) -> Result<Self, ParseFailure> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        Self::parse(&tokens, db)
    }

    /// Tests an event against every constraint.
    ///
    /// A key set is satisfied by the primary key, or by the secondary
    /// key-modifier when no primary key is assigned.
    #[must_use]
    pub fn matches(&self, event: &EventDescriptor) -> bool {
        if !self.modifiers.iter().all(|modifier| modifier.is_set(event)) {
            return false;
        }

        self.key_sets.iter().all(|candidates| {
            if event.is_unassigned() {
                event.has_key_modifier() && candidates.contains(&event.key_modifier)
            } else {
                candidates.contains(&event.key)
            }
        })
    }

    /// Modifiers required by this spec.
    #[must_use]
    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    /// Candidate key sets, ordered smallest first.
    #[must_use]
    pub fn key_sets(&self) -> &[BTreeSet<String>] {
        &self.key_sets
    }

    /// True when the spec places no constraint at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.key_sets.is_empty()
    }
}
