// Keyintent Event Model
// Raw keyboard events as delivered by the upstream input layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModifierMask;

/// Wire value for a raw key-down event.
pub const RAW_KEY_DOWN: i32 = 7;
/// Wire value for a key-up event.
pub const RAW_KEY_UP: i32 = 9;

/// Represents the type of a raw keyboard event.
///
/// The numeric values are imposed by the upstream input layer:
///   7 == 'raw key down'
///   9 == 'key up'
///
/// Any other value is kept as `Other` so it still takes part in
/// de-duplication, but it never matches a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum EventType {
    KeyDown,
    KeyUp,
    Other(i32),
}

impl EventType {
    /// Create EventType from its wire value
    pub fn from_i32(value: i32) -> Self {
        match value {
            RAW_KEY_DOWN => EventType::KeyDown,
            RAW_KEY_UP => EventType::KeyUp,
            other => EventType::Other(other),
        }
    }

    /// Convert EventType to its wire value
    pub fn to_i32(self) -> i32 {
        match self {
            EventType::KeyDown => RAW_KEY_DOWN,
            EventType::KeyUp => RAW_KEY_UP,
            EventType::Other(value) => value,
        }
    }

    /// Returns true if this is a KeyDown event
    pub fn is_down(self) -> bool {
        matches!(self, EventType::KeyDown)
    }

    /// Returns true if this is a KeyUp event
    pub fn is_up(self) -> bool {
        matches!(self, EventType::KeyUp)
    }
}

impl From<i32> for EventType {
    fn from(value: i32) -> Self {
        EventType::from_i32(value)
    }
}

impl From<EventType> for i32 {
    fn from(kind: EventType) -> Self {
        kind.to_i32()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::KeyDown => write!(f, "down"),
            EventType::KeyUp => write!(f, "up"),
            EventType::Other(value) => write!(f, "type({})", value),
        }
    }
}

/// A single raw keyboard event.
///
/// Two events are considered the same event (for de-duplication) when all
/// three fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub modifiers: ModifierMask,
    pub keycode: u32,
}

impl KeyEvent {
    pub fn new(kind: EventType, modifiers: ModifierMask, keycode: u32) -> Self {
        Self {
            kind,
            modifiers,
            keycode,
        }
    }

    /// Build a KeyDown event
    pub fn down(modifiers: ModifierMask, keycode: u32) -> Self {
        Self::new(EventType::KeyDown, modifiers, keycode)
    }

    /// Build a KeyUp event
    pub fn up(modifiers: ModifierMask, keycode: u32) -> Self {
        Self::new(EventType::KeyUp, modifiers, keycode)
    }

    /// Build an event from the upstream wire values
    pub fn from_raw(kind: i32, modifiers: u32, keycode: u32) -> Self {
        Self::new(
            EventType::from_i32(kind),
            ModifierMask::from_bits(modifiers),
            keycode,
        )
    }

    /// Parse one recorded event line.
    ///
    /// Accepts either the JSON object shape
    /// `{"type":7,"modifiers":2,"keycode":74}` or a whitespace separated
    /// triple `7 2 74`.
    pub fn parse_line(line: &str) -> Result<Self, EventParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(EventParseError::Empty);
        }

        if trimmed.starts_with('{') {
            return serde_json::from_str(trimmed).map_err(EventParseError::Json);
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(EventParseError::FieldCount(fields.len()));
        }

        let kind = parse_field::<i32>("type", fields[0])?;
        let modifiers = parse_field::<u32>("modifiers", fields[1])?;
        let keycode = parse_field::<u32>("keycode", fields[2])?;
        Ok(Self::from_raw(kind, modifiers, keycode))
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, EventParseError> {
    value.parse().map_err(|_| EventParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}

impl FromStr for KeyEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::keycode::key_name(self.keycode) {
            Some(name) => write!(f, "{} [{}] {}", self.kind, self.modifiers, name),
            None => write!(f, "{} [{}] #{}", self.kind, self.modifiers, self.keycode),
        }
    }
}

/// Errors that can occur when parsing a recorded event line
#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("empty event line")]
    Empty,

    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),

    #[error("expected 3 fields (type modifiers keycode), found {0}")]
    FieldCount(usize),

    #[error("invalid {field} value: '{value}'")]
    InvalidField { field: &'static str, value: String },
}
