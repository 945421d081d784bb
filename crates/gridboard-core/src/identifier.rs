//! Widget identifiers backed by a process-wide string interner.
//!
//! This module provides the [`WidgetId`] type. Widget ids are compared and
//! hashed on every collision check and reorder, so they are interned once and
//! passed around as `Copy` symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for widget identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Identifier of a widget within a board.
///
/// # Examples
///
/// ```
/// use gridboard_core::identifier::WidgetId;
///
/// let clock = WidgetId::new("clock");
/// let again: WidgetId = "clock".into();
///
/// assert_eq!(clock, again);
/// assert_eq!(clock, "clock");
/// assert_eq!(clock.to_string(), "clock");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(DefaultSymbol);

impl WidgetId {
    /// Creates a `WidgetId` from its textual name.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the textual name of this id.
    fn with_name<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(name)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.with_name(str::to_owned);
        f.write_str(&name)
    }
}

impl From<&str> for WidgetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for WidgetId {
    fn eq(&self, other: &str) -> bool {
        self.with_name(|name| name == other)
    }
}

impl PartialEq<&str> for WidgetId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for WidgetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = self.with_name(str::to_owned);
        serializer.serialize_str(&name)
    }
}

impl<'de> Deserialize<'de> for WidgetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = WidgetId::new("weather");
        let b = WidgetId::new("weather");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_names_differ() {
        assert_ne!(WidgetId::new("weather"), WidgetId::new("radio"));
    }

    #[test]
    fn test_display_and_str_comparison() {
        let id = WidgetId::new("inventory");
        assert_eq!(id.to_string(), "inventory");
        assert!(id == "inventory");
        assert!(id != "stats");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = WidgetId::new("map");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"map\"");

        let back: WidgetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
