//! Grid-cell geometry for widget placement.
//!
//! This module provides the rectangle types used to place widgets on a
//! column grid. All values are measured in whole grid cells.
//!
//! # Overview
//!
//! - [`GridSize`] - Width and height of a widget in cells
//! - [`GridPosition`] - A widget rectangle: top-left cell plus size
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► col
//!     │
//!     │
//!     ▼
//!    row
//! ```
//!
//! - **Origin**: Top-left cell at `col 0, row 0`
//! - **Columns**: Bounded by the column count of the active breakpoint
//! - **Rows**: Unbounded; the board grows downward
//!
//! Coordinates are unsigned, so a rectangle can never start left of or above
//! the origin.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of a widget, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width in columns
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height in rows
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns true if either dimension is zero
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a size whose width is at most `columns`
    pub fn clamp_width(self, columns: u32) -> Self {
        Self {
            width: self.width.min(columns),
            height: self.height,
        }
    }
}

impl Default for GridSize {
    /// A single cell.
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Rectangle occupied by a widget, in grid cells.
///
/// The rectangle covers columns `col..col + width` and rows
/// `row..row + height` (half-open ranges), so two rectangles that merely
/// share an edge do not overlap.
///
/// # Examples
///
/// ```
/// # use gridboard_core::geometry::{GridPosition, GridSize};
/// let left = GridPosition::new(0, 0, 2, 1);
/// let right = GridPosition::new(2, 0, 2, 1);
/// assert!(!left.overlaps(&right));
///
/// let a = GridPosition::new(0, 0, 2, 2);
/// let b = GridPosition::at(1, 1, GridSize::new(2, 2));
/// assert!(a.overlaps(&b));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    col: u32,
    row: u32,
    width: u32,
    height: u32,
}

impl GridPosition {
    /// Creates a position from its top-left cell and its dimensions
    pub fn new(col: u32, row: u32, width: u32, height: u32) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    /// Creates a position with the given top-left cell and size
    pub fn at(col: u32, row: u32, size: GridSize) -> Self {
        Self::new(col, row, size.width, size.height)
    }

    /// Returns the leftmost column
    pub fn col(self) -> u32 {
        self.col
    }

    /// Returns the topmost row
    pub fn row(self) -> u32 {
        self.row
    }

    /// Returns the width in columns
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height in rows
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns the size part of this position
    pub fn size(self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Returns the first column to the right of the rectangle (`col + width`)
    pub fn right(self) -> u32 {
        self.col.saturating_add(self.width)
    }

    /// Returns the first row below the rectangle (`row + height`)
    pub fn bottom(self) -> u32 {
        self.row.saturating_add(self.height)
    }

    /// Returns a copy of this position with a different size
    pub fn with_size(self, size: GridSize) -> Self {
        Self::at(self.col, self.row, size)
    }

    /// Returns true if either dimension is zero
    pub fn is_empty(self) -> bool {
        self.size().is_empty()
    }

    /// Returns true if the rectangle fits within `columns` columns.
    pub fn fits_columns(self, columns: u32) -> bool {
        self.right() <= columns
    }

    /// Checks whether two rectangles share at least one cell.
    ///
    /// This is the separating-axis test for axis-aligned rectangles: they are
    /// disjoint if one lies entirely to the left of, right of, above or below
    /// the other. Touching edges count as disjoint.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.col >= other.right()
            || self.right() <= other.col
            || self.row >= other.bottom()
            || self.bottom() <= other.row)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at col {}, row {}", self.size(), self.col, self.row)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn position_strategy() -> impl Strategy<Value = GridPosition> {
        (0u32..20, 0u32..20, 1u32..6, 1u32..6)
            .prop_map(|(col, row, w, h)| GridPosition::new(col, row, w, h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlap is symmetric: a overlaps b iff b overlaps a.
    fn check_overlap_is_symmetric(a: GridPosition, b: GridPosition) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        Ok(())
    }

    /// Overlap agrees with a cell-by-cell intersection.
    fn check_overlap_matches_cells(a: GridPosition, b: GridPosition) -> Result<(), TestCaseError> {
        let shares_cell = (a.col()..a.right()).any(|col| {
            (a.row()..a.bottom()).any(|row| {
                col >= b.col() && col < b.right() && row >= b.row() && row < b.bottom()
            })
        });
        prop_assert_eq!(a.overlaps(&b), shares_cell);
        Ok(())
    }

    /// A non-empty rectangle always overlaps itself.
    fn check_overlaps_self(a: GridPosition) -> Result<(), TestCaseError> {
        prop_assert!(a.overlaps(&a));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in position_strategy(), b in position_strategy()) {
            check_overlap_is_symmetric(a, b)?;
        }

        #[test]
        fn overlap_matches_cells(a in position_strategy(), b in position_strategy()) {
            check_overlap_matches_cells(a, b)?;
        }

        #[test]
        fn overlaps_self(a in position_strategy()) {
            check_overlaps_self(a)?;
        }
    }
}
