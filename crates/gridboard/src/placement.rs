//! Collision-aware placement of widgets on a column grid.
//!
//! Widgets occupy axis-aligned rectangles of grid cells (see
//! [`GridPosition::overlaps`] for the collision rule). This module checks
//! whether a rectangle may be placed on a board and finds the first free slot
//! for a widget of a given size.
//!
//! # Free-slot search
//!
//! [`find_next_available_position`] returns the first collision-free
//! rectangle in row-major order (lowest row first, then lowest column). The
//! first free rectangle always starts on row 0 or on the bottom edge of an
//! existing rectangle, and on column 0 or on the right edge of an existing
//! rectangle: any other candidate could be shifted up or left without
//! colliding. Only those rows and columns are tried, and the bottom edge of
//! the lowest rectangle is free across the whole width, so the search ends
//! without any row limit.

use log::{trace, warn};
use thiserror::Error;

use gridboard_core::{
    geometry::{GridPosition, GridSize},
    identifier::WidgetId,
    widget::Widget,
};

/// Reasons a rectangle cannot be placed on a board.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("widget size {size} is empty; width and height must be at least 1")]
    ZeroSize { size: GridSize },

    #[error("{position} ends at column {right}, past the {columns} available columns")]
    OutOfBounds {
        position: GridPosition,
        right: u32,
        columns: u32,
    },

    #[error("{position} overlaps widget `{other}`")]
    Collision {
        position: GridPosition,
        other: WidgetId,
    },
}

/// Something that may occupy a rectangle on the grid.
pub trait Placed {
    fn id(&self) -> WidgetId;

    /// Returns the occupied rectangle, or `None` if not placed yet.
    fn position(&self) -> Option<GridPosition>;
}

impl Placed for Widget {
    fn id(&self) -> WidgetId {
        Widget::id(self)
    }

    fn position(&self) -> Option<GridPosition> {
        Widget::position(self)
    }
}

impl Placed for (WidgetId, GridPosition) {
    fn id(&self) -> WidgetId {
        self.0
    }

    fn position(&self) -> Option<GridPosition> {
        Some(self.1)
    }
}

/// Checks a candidate rectangle against the grid bounds and other widgets.
///
/// # Arguments
///
/// * `position` - The candidate rectangle.
/// * `widgets` - Widgets already on the board. Unplaced widgets are ignored.
///   Any iterator of references works: a slice, a `Vec`, or map values.
/// * `exclude` - A widget to skip, typically the one being moved or resized.
/// * `columns` - Column count of the active breakpoint.
///
/// # Errors
///
/// Returns the first problem found: an empty size, a rectangle extending past
/// the last column, or a collision with another widget.
pub fn validate_position<'a, W, I>(
    position: GridPosition,
    widgets: I,
    exclude: Option<WidgetId>,
    columns: u32,
) -> Result<(), PlacementError>
where
    W: Placed + 'a,
    I: IntoIterator<Item = &'a W>,
{
    if position.is_empty() {
        return Err(PlacementError::ZeroSize {
            size: position.size(),
        });
    }

    if !position.fits_columns(columns) {
        return Err(PlacementError::OutOfBounds {
            position,
            right: position.right(),
            columns,
        });
    }

    let collision = widgets
        .into_iter()
        .filter(|widget| Some(widget.id()) != exclude)
        .find(|widget| {
            widget
                .position()
                .is_some_and(|other| position.overlaps(&other))
        });

    match collision {
        Some(other) => Err(PlacementError::Collision {
            position,
            other: other.id(),
        }),
        None => Ok(()),
    }
}

/// Returns true if `position` can be placed; see [`validate_position`].
///
/// # Examples
///
/// ```
/// # use gridboard::placement::is_valid_position;
/// # use gridboard_core::{geometry::GridPosition, widget::Widget};
/// let nothing: [Widget; 0] = [];
///
/// assert!(is_valid_position(GridPosition::new(6, 0, 2, 1), &nothing, None, 8));
/// // 7 + 2 > 8
/// assert!(!is_valid_position(GridPosition::new(7, 0, 2, 1), &nothing, None, 8));
/// ```
pub fn is_valid_position<'a, W, I>(
    position: GridPosition,
    widgets: I,
    exclude: Option<WidgetId>,
    columns: u32,
) -> bool
where
    W: Placed + 'a,
    I: IntoIterator<Item = &'a W>,
{
    validate_position(position, widgets, exclude, columns).is_ok()
}

/// Returns true if `candidate` overlaps any of `existing`.
pub fn collides<'a, I>(candidate: GridPosition, existing: I) -> bool
where
    I: IntoIterator<Item = &'a GridPosition>,
{
    existing
        .into_iter()
        .any(|other| candidate.overlaps(other))
}

/// Returns the first row below every rectangle (`0` for an empty board).
pub fn lowest_row(existing: &[GridPosition]) -> u32 {
    existing
        .iter()
        .map(|position| position.bottom())
        .max()
        .unwrap_or(0)
}

/// Finds the first free rectangle of `size`, scanning rows top to bottom and
/// columns left to right.
///
/// Never fails. A size wider than the grid cannot fit anywhere, so it is
/// placed at column 0 below every existing widget and a warning is logged.
///
/// # Examples
///
/// ```
/// # use gridboard::placement::find_next_available_position;
/// # use gridboard_core::geometry::{GridPosition, GridSize};
/// let empty = find_next_available_position(GridSize::new(1, 1), &[], 8);
/// assert_eq!(empty, GridPosition::new(0, 0, 1, 1));
///
/// let full_row: Vec<_> = (0..8).map(|col| GridPosition::new(col, 0, 1, 1)).collect();
/// let next = find_next_available_position(GridSize::new(1, 1), &full_row, 8);
/// assert_eq!(next, GridPosition::new(0, 1, 1, 1));
/// ```
pub fn find_next_available_position(
    size: GridSize,
    existing: &[GridPosition],
    columns: u32,
) -> GridPosition {
    let bottom = lowest_row(existing);

    if size.width() > columns {
        warn!(
            size:% = size,
            columns;
            "Widget is wider than the grid, placing it below all widgets"
        );
        return GridPosition::at(0, bottom, size);
    }

    let last_col = columns - size.width();
    let rows = candidate_lines(existing.iter().map(|position| position.bottom()));
    let cols = candidate_lines(existing.iter().map(|position| position.right()));

    for &row in &rows {
        for &col in cols.iter().take_while(|col| **col <= last_col) {
            let candidate = GridPosition::at(col, row, size);
            if !collides(candidate, existing) {
                trace!(position:% = candidate; "Found free position");
                return candidate;
            }
        }
    }

    // The row below the lowest widget is always among the candidates and
    // free at column 0, so the loop above returns before reaching this.
    GridPosition::at(0, bottom, size)
}

/// Sorted, deduplicated scan lines: `0` plus every given edge.
fn candidate_lines(edges: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut lines: Vec<u32> = std::iter::once(0).chain(edges).collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}
