//! Gap-based ordering keys.
//!
//! Widgets are sorted by an integer [`OrderKey`]. Keys are handed out with a
//! large gap between neighbours so that a widget dropped between two others
//! can take the midpoint of their keys without touching any other widget.
//! Repeated insertions at the same spot halve the gap each time; once it is
//! exhausted the board is reorganized, rewriting every key evenly spaced.
//!
//! # Overview
//!
//! - [`allocate`] - Computes a key for an insertion point, or reports that
//!   the neighbours leave no room.
//! - [`needs_reorganization`] - Detects adjacent keys closer than the
//!   configured minimum spacing.
//! - [`reorganize`] - Rewrites all keys evenly spaced, preserving order.
//! - [`reorganize_with_slot`] - Same, leaving a slot free for a pending insertion.
//!
//! # Example
//!
//! ```
//! # use gridboard::{config::OrderingConfig, ordering::{self, OrderError}};
//! # use gridboard_core::order::OrderKey;
//! let config = OrderingConfig::default();
//!
//! let first = ordering::allocate(None, None, &config).unwrap();
//! let last = ordering::allocate(Some(first), None, &config).unwrap();
//! assert_eq!((first.value(), last.value()), (0, 1000));
//!
//! let middle = ordering::allocate(Some(first), Some(last), &config).unwrap();
//! assert_eq!(middle.value(), 500);
//!
//! let crowded = ordering::allocate(Some(OrderKey::new(7)), Some(OrderKey::new(8)), &config);
//! assert!(matches!(crowded, Err(OrderError::NeedsReorganization { .. })));
//! ```

use log::{debug, trace};
use thiserror::Error;

use gridboard_core::{identifier::WidgetId, order::OrderKey, widget::Widget};

use crate::config::OrderingConfig;

/// Errors produced while allocating order keys.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// The neighbours of the insertion point leave no integer key between
    /// them. The board must be reorganized before the insertion is retried.
    #[error("no free order key before {after}; the board needs reorganization")]
    NeedsReorganization {
        before: Option<OrderKey>,
        after: OrderKey,
    },

    #[error("order key arithmetic overflowed")]
    KeyOverflow,
}

/// Something that has an identity and a position in the ordering.
pub trait Ordered {
    fn id(&self) -> WidgetId;

    fn order(&self) -> OrderKey;
}

impl Ordered for Widget {
    fn id(&self) -> WidgetId {
        Widget::id(self)
    }

    fn order(&self) -> OrderKey {
        Widget::order(self)
    }
}

impl Ordered for (WidgetId, OrderKey) {
    fn id(&self) -> WidgetId {
        self.0
    }

    fn order(&self) -> OrderKey {
        self.1
    }
}

/// A new key for one widget, produced by reorganization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUpdate {
    id: WidgetId,
    key: OrderKey,
}

impl KeyUpdate {
    pub fn new(id: WidgetId, key: OrderKey) -> Self {
        Self { id, key }
    }

    /// Returns the widget the key belongs to
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Returns the new key
    pub fn key(&self) -> OrderKey {
        self.key
    }
}

/// Computes an order key for a widget inserted between two neighbours.
///
/// # Arguments
///
/// * `before` - Key of the widget immediately preceding the insertion point.
/// * `after` - Key of the widget immediately following the insertion point.
/// * `config` - Gap and minimum key to use.
///
/// | `before` | `after` | Result |
/// |----------|---------|--------|
/// | none | none | `min_key` |
/// | `b` | none | `b + gap` |
/// | none | `a` | `max(min_key, a - gap)`, if that is below `a` |
/// | `b` | `a` | `floor((b + a) / 2)`, if `a - b > 1` |
///
/// # Errors
///
/// Returns [`OrderError::NeedsReorganization`] when the neighbours leave no
/// unused integer key, and [`OrderError::KeyOverflow`] if the key would not
/// fit in an `i64`. No key is produced in either case.
pub fn allocate(
    before: Option<OrderKey>,
    after: Option<OrderKey>,
    config: &OrderingConfig,
) -> Result<OrderKey, OrderError> {
    let key = match (before, after) {
        (None, None) => OrderKey::new(config.min_key()),
        (Some(before), None) => before
            .value()
            .checked_add(config.gap())
            .map(OrderKey::new)
            .ok_or(OrderError::KeyOverflow)?,
        (None, Some(after)) => {
            let candidate = after
                .value()
                .saturating_sub(config.gap())
                .max(config.min_key());
            if candidate >= after.value() {
                return Err(OrderError::NeedsReorganization {
                    before: None,
                    after,
                });
            }
            OrderKey::new(candidate)
        }
        (Some(before), Some(after)) => {
            let span = after
                .distance_from(before)
                .ok_or(OrderError::KeyOverflow)?;
            if span <= 1 {
                return Err(OrderError::NeedsReorganization {
                    before: Some(before),
                    after,
                });
            }
            OrderKey::new(before.value() + span / 2)
        }
    };

    trace!(before:?, after:?, key:?; "Allocated order key");
    Ok(key)
}

/// Reports whether any two adjacent keys are closer than `min_spacing`.
///
/// Keys are sorted before the check, so callers may pass them in any order.
/// Duplicate keys always require reorganization.
pub fn needs_reorganization<I>(keys: I, config: &OrderingConfig) -> bool
where
    I: IntoIterator<Item = OrderKey>,
{
    let mut keys: Vec<OrderKey> = keys.into_iter().collect();
    keys.sort_unstable();

    keys.windows(2).any(|pair| {
        pair[1]
            .distance_from(pair[0])
            .is_some_and(|gap| gap < config.min_spacing())
    })
}

/// Rewrites all keys evenly spaced, preserving the current order.
///
/// Items are ordered by their current key; items with equal keys keep the
/// order in which they were passed. The item at index `i` receives
/// `min_key + i * gap`, so reorganizing an already uniform board yields the
/// keys it already has.
///
/// # Examples
///
/// ```
/// # use gridboard::{config::OrderingConfig, ordering};
/// # use gridboard_core::{identifier::WidgetId, order::OrderKey};
/// let items = [
///     (WidgetId::new("b"), OrderKey::new(501)),
///     (WidgetId::new("a"), OrderKey::new(500)),
/// ];
///
/// let updates = ordering::reorganize(&items, &OrderingConfig::default());
/// assert_eq!(updates[0].id(), "a");
/// assert_eq!(updates[0].key().value(), 0);
/// assert_eq!(updates[1].id(), "b");
/// assert_eq!(updates[1].key().value(), 1000);
/// ```
pub fn reorganize<T: Ordered>(items: &[T], config: &OrderingConfig) -> Vec<KeyUpdate> {
    let updates: Vec<KeyUpdate> = sorted_by_key(items)
        .into_iter()
        .enumerate()
        .map(|(index, item)| KeyUpdate::new(item.id(), spaced_key(index, config)))
        .collect();

    debug!(count = updates.len(); "Reorganized order keys");
    updates
}

/// Rewrites all keys evenly spaced, leaving the key at index `slot` unused.
///
/// This completes an insertion that [`allocate`] rejected: the returned key
/// sits between the items at `slot - 1` and `slot` in the new ordering. A
/// `slot` past the end reserves the key after the last item.
///
/// # Returns
///
/// The key updates for all existing items and the key reserved for the slot.
pub fn reorganize_with_slot<T: Ordered>(
    items: &[T],
    slot: usize,
    config: &OrderingConfig,
) -> (Vec<KeyUpdate>, OrderKey) {
    let slot = slot.min(items.len());

    let updates: Vec<KeyUpdate> = sorted_by_key(items)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let index = if index < slot { index } else { index + 1 };
            KeyUpdate::new(item.id(), spaced_key(index, config))
        })
        .collect();
    let reserved = spaced_key(slot, config);

    debug!(count = updates.len(), slot, reserved:?; "Reorganized order keys around a free slot");
    (updates, reserved)
}

/// Stable sort of `items` by their current key.
fn sorted_by_key<T: Ordered>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.order());
    sorted
}

fn spaced_key(index: usize, config: &OrderingConfig) -> OrderKey {
    let index = i64::try_from(index).unwrap_or(i64::MAX);
    OrderKey::new(
        config
            .min_key()
            .saturating_add(index.saturating_mul(config.gap())),
    )
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn key_pair_strategy() -> impl Strategy<Value = (OrderKey, OrderKey)> {
        (-1_000_000i64..1_000_000, 2i64..1_000_000)
            .prop_map(|(before, span)| (OrderKey::new(before), OrderKey::new(before + span)))
    }

    fn items_strategy() -> impl Strategy<Value = Vec<(WidgetId, OrderKey)>> {
        prop::collection::vec(-10_000i64..10_000, 0..40).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (WidgetId::new(&format!("w{index}")), OrderKey::new(value)))
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A midpoint with room lies strictly between its neighbours.
    fn check_allocate_is_strictly_between(
        before: OrderKey,
        after: OrderKey,
    ) -> Result<(), TestCaseError> {
        let config = OrderingConfig::default();
        let key = allocate(Some(before), Some(after), &config)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert!(key > before);
        prop_assert!(key < after);
        Ok(())
    }

    /// Sorting by the new keys gives the same order as sorting by the old ones.
    fn check_reorganize_preserves_order(
        items: Vec<(WidgetId, OrderKey)>,
    ) -> Result<(), TestCaseError> {
        let config = OrderingConfig::default();
        let updates = reorganize(&items, &config);

        let mut by_old = items.clone();
        by_old.sort_by_key(|(_, key)| *key);
        let old_order: Vec<WidgetId> = by_old.iter().map(|(id, _)| *id).collect();

        let mut by_new = updates.clone();
        by_new.sort_by_key(KeyUpdate::key);
        let new_order: Vec<WidgetId> = by_new.iter().map(KeyUpdate::id).collect();

        prop_assert_eq!(old_order, new_order);
        Ok(())
    }

    /// Every adjacent gap after reorganization equals the configured gap.
    fn check_reorganize_gaps_are_uniform(
        items: Vec<(WidgetId, OrderKey)>,
    ) -> Result<(), TestCaseError> {
        let config = OrderingConfig::default();
        let updates = reorganize(&items, &config);

        for pair in updates.windows(2) {
            prop_assert_eq!(pair[1].key().distance_from(pair[0].key()), Some(config.gap()));
        }
        prop_assert!(!needs_reorganization(updates.iter().map(KeyUpdate::key), &config));
        Ok(())
    }

    /// Reorganizing twice gives the same keys as reorganizing once.
    fn check_reorganize_is_idempotent(
        items: Vec<(WidgetId, OrderKey)>,
    ) -> Result<(), TestCaseError> {
        let config = OrderingConfig::default();
        let once = reorganize(&items, &config);
        let as_items: Vec<(WidgetId, OrderKey)> =
            once.iter().map(|u| (u.id(), u.key())).collect();
        let twice = reorganize(&as_items, &config);

        prop_assert_eq!(once, twice);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn allocate_is_strictly_between((before, after) in key_pair_strategy()) {
            check_allocate_is_strictly_between(before, after)?;
        }

        #[test]
        fn reorganize_preserves_order(items in items_strategy()) {
            check_reorganize_preserves_order(items)?;
        }

        #[test]
        fn reorganize_gaps_are_uniform(items in items_strategy()) {
            check_reorganize_gaps_are_uniform(items)?;
        }

        #[test]
        fn reorganize_is_idempotent(items in items_strategy()) {
            check_reorganize_is_idempotent(items)?;
        }
    }
}
