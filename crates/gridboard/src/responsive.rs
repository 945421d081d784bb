//! Reflowing a board for a different column count.
//!
//! When the viewport crosses a breakpoint the grid gains or loses columns.
//! [`reflow`] keeps every widget where it is when it still fits and moves the
//! rest to the first free slot, visiting widgets in their display order so
//! earlier widgets keep priority.

use log::debug;

use gridboard_core::{
    geometry::{GridPosition, GridSize},
    identifier::WidgetId,
    widget::Widget,
};

use crate::placement::{collides, find_next_available_position};

/// A new rectangle for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    id: WidgetId,
    position: GridPosition,
}

impl PositionUpdate {
    pub fn new(id: WidgetId, position: GridPosition) -> Self {
        Self { id, position }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }
}

/// Re-places widgets on a grid of `columns` columns.
///
/// Widgets are visited in order-key order (ties keep slice order). Widths are
/// clamped to `columns`. A widget keeps its rectangle if it fits and does not
/// collide with a widget visited before it; otherwise it is moved to the
/// first free slot. Unplaced widgets are placed as single cells.
///
/// # Returns
///
/// Updates for the widgets whose rectangle changed, in visiting order.
///
/// # Examples
///
/// ```
/// # use gridboard::responsive::reflow;
/// # use gridboard_core::{geometry::GridPosition, identifier::WidgetId, order::OrderKey, widget::Widget};
/// let widgets = [
///     Widget::new(WidgetId::new("map"), OrderKey::new(0)).with_position(GridPosition::new(0, 0, 4, 2)),
///     Widget::new(WidgetId::new("radio"), OrderKey::new(1000)).with_position(GridPosition::new(4, 0, 2, 1)),
/// ];
///
/// // Two columns on mobile: the map shrinks, the radio drops below it
/// let updates = reflow(&widgets, 2);
/// assert_eq!(updates[0].position(), GridPosition::new(0, 0, 2, 2));
/// assert_eq!(updates[1].position(), GridPosition::new(0, 2, 2, 1));
/// ```
pub fn reflow(widgets: &[Widget], columns: u32) -> Vec<PositionUpdate> {
    let mut ordered: Vec<&Widget> = widgets.iter().collect();
    ordered.sort_by_key(|widget| widget.order());

    let mut placed: Vec<GridPosition> = Vec::with_capacity(ordered.len());
    let mut updates = Vec::new();

    for widget in ordered {
        let size = widget
            .position()
            .map_or_else(GridSize::default, GridPosition::size)
            .clamp_width(columns);

        let kept = widget
            .position()
            .map(|position| position.with_size(size))
            .filter(|position| position.fits_columns(columns) && !collides(*position, &placed));
        let position = kept.unwrap_or_else(|| find_next_available_position(size, &placed, columns));

        if widget.position() != Some(position) {
            updates.push(PositionUpdate::new(widget.id(), position));
        }
        placed.push(position);
    }

    debug!(columns, moved = updates.len(); "Reflowed board");
    updates
}

#[cfg(test)]
mod tests {
    use gridboard_core::order::OrderKey;

    use super::*;

    fn widget(name: &str, order: i64, position: Option<GridPosition>) -> Widget {
        let widget = Widget::new(WidgetId::new(name), OrderKey::new(order));
        match position {
            Some(position) => widget.with_position(position),
            None => widget,
        }
    }

    #[test]
    fn test_reflow_keeps_fitting_widgets() {
        let widgets = [
            widget("a", 0, Some(GridPosition::new(0, 0, 2, 1))),
            widget("b", 1000, Some(GridPosition::new(2, 0, 2, 1))),
        ];
        assert!(reflow(&widgets, 4).is_empty());
    }

    #[test]
    fn test_reflow_to_wider_grid_changes_nothing() {
        let widgets = [
            widget("a", 0, Some(GridPosition::new(0, 0, 2, 1))),
            widget("b", 1000, Some(GridPosition::new(0, 1, 2, 1))),
        ];
        assert!(reflow(&widgets, 8).is_empty());
    }

    #[test]
    fn test_reflow_moves_overflowing_widgets_down() {
        let widgets = [
            widget("a", 0, Some(GridPosition::new(0, 0, 2, 1))),
            widget("b", 1000, Some(GridPosition::new(2, 0, 2, 1))),
            widget("c", 2000, Some(GridPosition::new(4, 0, 2, 1))),
        ];

        let updates = reflow(&widgets, 2);
        assert_eq!(
            updates,
            vec![
                PositionUpdate::new(WidgetId::new("b"), GridPosition::new(0, 1, 2, 1)),
                PositionUpdate::new(WidgetId::new("c"), GridPosition::new(0, 2, 2, 1)),
            ]
        );
    }

    #[test]
    fn test_reflow_respects_order_keys_over_slice_order() {
        // `late` is first in the slice but last in the ordering, so `early`
        // keeps the contested cell.
        let widgets = [
            widget("late", 5000, Some(GridPosition::new(0, 0, 1, 1))),
            widget("early", 0, Some(GridPosition::new(0, 0, 1, 1))),
        ];

        let updates = reflow(&widgets, 1);
        assert_eq!(
            updates,
            vec![PositionUpdate::new(
                WidgetId::new("late"),
                GridPosition::new(0, 1, 1, 1)
            )]
        );
    }

    #[test]
    fn test_reflow_places_unplaced_widgets() {
        let widgets = [
            widget("a", 0, Some(GridPosition::new(0, 0, 1, 1))),
            widget("new", 1000, None),
        ];

        let updates = reflow(&widgets, 4);
        assert_eq!(
            updates,
            vec![PositionUpdate::new(
                WidgetId::new("new"),
                GridPosition::new(1, 0, 1, 1)
            )]
        );
    }

    #[test]
    fn test_reflow_result_has_no_overlaps() {
        let widgets = [
            widget("a", 0, Some(GridPosition::new(0, 0, 3, 2))),
            widget("b", 1000, Some(GridPosition::new(3, 0, 5, 1))),
            widget("c", 2000, Some(GridPosition::new(3, 1, 2, 2))),
            widget("d", 3000, Some(GridPosition::new(5, 1, 3, 3))),
        ];

        let updates = reflow(&widgets, 4);
        let mut final_positions: Vec<GridPosition> = widgets
            .iter()
            .map(|w| {
                updates
                    .iter()
                    .find(|u| u.id() == w.id())
                    .map_or_else(|| w.position().unwrap(), PositionUpdate::position)
            })
            .collect();

        while let Some(position) = final_positions.pop() {
            assert!(position.fits_columns(4));
            assert!(!collides(position, &final_positions));
        }
    }
}
