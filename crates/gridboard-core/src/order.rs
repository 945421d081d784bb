//! Integer sort keys for widgets.
//!
//! An [`OrderKey`] places a widget within its board. Keys are sparse: they are
//! handed out with a gap between neighbours so a widget can be inserted
//! between two others without renumbering the rest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort key of a widget within its board.
///
/// Keys are plain integers, so they are totally ordered and compare exactly.
///
/// # Examples
///
/// ```
/// # use gridboard_core::order::OrderKey;
/// let first = OrderKey::new(0);
/// let second = OrderKey::new(1000);
///
/// assert!(first < second);
/// assert_eq!(second.distance_from(first), Some(1000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(i64);

impl OrderKey {
    /// Creates a key from its raw value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value of the key
    pub fn value(self) -> i64 {
        self.0
    }

    /// Returns `self - earlier`, or `None` on overflow.
    pub fn distance_from(self, earlier: OrderKey) -> Option<i64> {
        self.0.checked_sub(earlier.0)
    }
}

impl From<i64> for OrderKey {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_value() {
        let mut keys = vec![OrderKey::new(2000), OrderKey::new(-5), OrderKey::new(1000)];
        keys.sort();
        assert_eq!(
            keys,
            vec![OrderKey::new(-5), OrderKey::new(1000), OrderKey::new(2000)]
        );
    }

    #[test]
    fn test_distance_from() {
        assert_eq!(OrderKey::new(1500).distance_from(OrderKey::new(1000)), Some(500));
        assert_eq!(OrderKey::new(0).distance_from(OrderKey::new(10)), Some(-10));
        assert_eq!(
            OrderKey::new(i64::MAX).distance_from(OrderKey::new(-1)),
            None
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderKey::new(42).to_string(), "42");
    }
}
