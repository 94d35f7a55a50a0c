//! Host keymap entries as seen by the editor.
//!
//! Bindings are owned by the host application. The editor only ever holds a
//! point-in-time snapshot of them and never mutates their identity fields;
//! edits travel back to the host through [`crate::services::KeymapHost`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key code the host uses for "no key assigned".
pub const NONE_KEY: &str = "NONE";

/// Host-assigned handle identifying a single binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(pub u32);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device class an event belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapType {
    #[default]
    Keyboard,
    Mouse,
    Ndof,
    Tweak,
    Timer,
    Textinput,
}

impl MapType {
    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Keyboard => "Keyboard",
            Self::Mouse => "Mouse",
            Self::Ndof => "NDOF",
            Self::Tweak => "Tweak",
            Self::Timer => "Timer",
            Self::Textinput => "Text Input",
        }
    }

    /// Timer and text-input events are synthesized by the host and never
    /// collide with a user-pressed shortcut.
    #[must_use]
    pub const fn can_conflict(self) -> bool {
        !matches!(self, Self::Timer | Self::Textinput)
    }
}

/// Event state a binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyValue {
    Any,
    #[default]
    Press,
    Release,
    Click,
    DoubleClick,
    ClickDrag,
    Nothing,
}

impl KeyValue {
    /// Short label used when rendering an event, empty for the common case.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Press => "",
            Self::Any => "Any",
            Self::Release => "Release",
            Self::Click => "Click",
            Self::DoubleClick => "Double Click",
            Self::ClickDrag => "Click Drag",
            Self::Nothing => "Nothing",
        }
    }
}

fn default_none_key() -> String {
    NONE_KEY.to_string()
}

/// Structured key/modifier combination of a binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Primary key code (e.g. "A", "LEFTMOUSE", "NUMPAD_PLUS")
    #[serde(rename = "type", default = "default_none_key")]
    pub key: String,
    #[serde(default)]
    pub value: KeyValue,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub oskey: bool,
    /// Matches regardless of modifier state
    #[serde(default)]
    pub any: bool,
    /// Secondary key that must be held, `NONE` when unused
    #[serde(default = "default_none_key")]
    pub key_modifier: String,
    #[serde(default)]
    pub map_type: MapType,
}

impl Default for EventDescriptor {
    fn default() -> Self {
        Self::key(NONE_KEY)
    }
}

impl EventDescriptor {
    /// Plain press of `key` without modifiers.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: KeyValue::Press,
            ctrl: false,
            alt: false,
            shift: false,
            oskey: false,
            any: false,
            key_modifier: default_none_key(),
            map_type: MapType::Keyboard,
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn with_oskey(mut self) -> Self {
        self.oskey = true;
        self
    }

    #[must_use]
    pub fn with_map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: KeyValue) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_key_modifier(mut self, key: impl Into<String>) -> Self {
        self.key_modifier = key.into();
        self
    }

    /// Returns true if no primary key is assigned.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.key == NONE_KEY
    }

    /// Returns true if a secondary key-modifier is set.
    #[must_use]
    pub fn has_key_modifier(&self) -> bool {
        self.key_modifier != NONE_KEY
    }
}

impl fmt::Display for EventDescriptor {
    /// Renders as e.g. "Ctrl Shift A" or "Alt Q LEFTMOUSE Click".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.any {
            parts.push("Any");
        } else {
            if self.ctrl {
                parts.push("Ctrl");
            }
            if self.alt {
                parts.push("Alt");
            }
            if self.shift {
                parts.push("Shift");
            }
            if self.oskey {
                parts.push("OSKey");
            }
        }
        if self.has_key_modifier() {
            parts.push(&self.key_modifier);
        }
        parts.push(&self.key);

        write!(f, "{}", parts.join(" "))?;
        let value = self.value.label();
        if !value.is_empty() {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// A single host-managed shortcut entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Host handle, used for remove/restore requests
    pub id: BindingId,
    /// Operator identifier (e.g. "mesh.select_all")
    pub idname: String,
    /// Display name (e.g. "(De)select All")
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Added by the user rather than shipped with the host
    #[serde(default)]
    pub user_defined: bool,
    /// Differs from the host's factory default
    #[serde(default)]
    pub user_modified: bool,
    #[serde(flatten)]
    pub event: EventDescriptor,
}

impl Binding {
    /// Creates an active, unmodified binding.
    #[must_use]
    pub fn new(
        id: u32,
        idname: impl Into<String>,
        name: impl Into<String>,
        event: EventDescriptor,
    ) -> Self {
        Self {
            id: BindingId(id),
            idname: idname.into(),
            name: name.into(),
            active: true,
            user_defined: false,
            user_modified: false,
            event,
        }
    }

    /// Label shown in listings, falls back to the operator identifier.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.idname
        } else {
            &self.name
        }
    }
}

/// What to create when the user asks for a new binding in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTemplate {
    pub idname: String,
    #[serde(flatten)]
    pub event: EventDescriptor,
}

impl BindingTemplate {
    #[must_use]
    pub fn new(idname: impl Into<String>, event: EventDescriptor) -> Self {
        Self {
            idname: idname.into(),
            event,
        }
    }
}
