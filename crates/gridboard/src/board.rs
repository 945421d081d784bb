//! An in-memory board of widgets.
//!
//! [`Board`] composes ordering and placement: it keeps widgets sorted by
//! order key, allocates keys for insertions (reorganizing when a gap is
//! exhausted), auto-places new widgets and validates moves and resizes.
//!
//! Every mutation returns a [`BoardChange`] listing the keys and rectangles
//! that changed, so a caller persisting the board can write only those.

use indexmap::IndexMap;
use log::{debug, info};
use thiserror::Error;

use gridboard_core::{
    geometry::{GridPosition, GridSize},
    identifier::WidgetId,
    order::OrderKey,
    widget::Widget,
};

use crate::{
    config::OrderingConfig,
    ordering::{self, KeyUpdate, OrderError},
    placement::{self, PlacementError},
    responsive::{self, PositionUpdate},
};

/// Errors returned by [`Board`] mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("widget `{0}` is already on the board")]
    DuplicateWidget(WidgetId),

    #[error("widget `{0}` is not on the board")]
    UnknownWidget(WidgetId),

    #[error(transparent)]
    Ordering(#[from] OrderError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Keys and rectangles changed by one board mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardChange {
    keys: Vec<KeyUpdate>,
    positions: Vec<PositionUpdate>,
}

impl BoardChange {
    /// Returns the changed order keys
    pub fn keys(&self) -> &[KeyUpdate] {
        &self.keys
    }

    /// Returns the changed rectangles
    pub fn positions(&self) -> &[PositionUpdate] {
        &self.positions
    }

    /// Returns true if nothing changed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.positions.is_empty()
    }

    /// Returns true if the mutation rewrote keys of other widgets.
    pub fn reorganized(&self) -> bool {
        self.keys.len() > 1
    }
}

/// Widgets sharing one ordering and placement namespace, such as one tab of
/// a dashboard.
///
/// # Examples
///
/// ```
/// # use gridboard::{Board, config::OrderingConfig};
/// # use gridboard_core::{geometry::{GridPosition, GridSize}, identifier::WidgetId};
/// let mut board = Board::new(8, OrderingConfig::default());
///
/// board.add(WidgetId::new("clock"), GridSize::new(2, 1)).unwrap();
/// board.add(WidgetId::new("radio"), GridSize::new(2, 1)).unwrap();
/// board.insert_at(WidgetId::new("map"), GridSize::new(4, 2), 1).unwrap();
///
/// let order: Vec<String> = board.widgets().map(|w| w.id().to_string()).collect();
/// assert_eq!(order, ["clock", "map", "radio"]);
///
/// let map = board.get(WidgetId::new("map")).unwrap();
/// assert_eq!(map.position(), Some(GridPosition::new(4, 0, 4, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    columns: u32,
    config: OrderingConfig,
    /// Sorted by order key.
    widgets: IndexMap<WidgetId, Widget>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Arguments
    ///
    /// * `columns` - Column count of the active breakpoint.
    /// * `config` - Key spacing used for insertions and reorganization.
    pub fn new(columns: u32, config: OrderingConfig) -> Self {
        Self {
            columns,
            config,
            widgets: IndexMap::new(),
        }
    }

    /// Creates a board from existing widgets, keeping their keys and rectangles.
    ///
    /// Rectangles are not validated here; a persisted board may be checked
    /// with [`crate::layout_file::check`] first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateWidget`] if two widgets share an id.
    pub fn from_widgets<I>(widgets: I, columns: u32, config: OrderingConfig) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Widget>,
    {
        let mut board = Self::new(columns, config);
        for widget in widgets {
            if board.widgets.insert(widget.id(), widget).is_some() {
                return Err(BoardError::DuplicateWidget(widget.id()));
            }
        }
        board.sort();
        Ok(board)
    }

    /// Returns the column count of the grid
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the ordering configuration
    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Returns the widget with the given id
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Returns the index of the widget in display order
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.get_index_of(&id)
    }

    /// Iterates over widgets in display (order key) order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// Returns true if adjacent keys are too close for further midpoint insertions.
    pub fn needs_reorganization(&self) -> bool {
        ordering::needs_reorganization(self.widgets.values().map(Widget::order), &self.config)
    }

    /// Returns where a widget of `size` would be placed by [`Board::add`].
    ///
    /// # Errors
    ///
    /// Returns an error if the size is empty or wider than the grid.
    pub fn next_free_position(&self, size: GridSize) -> Result<GridPosition, BoardError> {
        self.check_size(size)?;
        Ok(placement::find_next_available_position(
            size,
            &self.positions(),
            self.columns,
        ))
    }

    /// Appends a widget after the last one and places it in the first free slot.
    ///
    /// # Errors
    ///
    /// See [`Board::insert_at`].
    pub fn add(&mut self, id: WidgetId, size: GridSize) -> Result<BoardChange, BoardError> {
        self.insert_at(id, size, self.len())
    }

    /// Inserts a widget at `index` in display order and places it in the first
    /// free slot. An index past the end appends.
    ///
    /// When the neighbours at `index` leave no free key, the board is
    /// reorganized and the returned change lists every rewritten key.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken, the size is empty, or the size is
    /// wider than the grid.
    pub fn insert_at(
        &mut self,
        id: WidgetId,
        size: GridSize,
        index: usize,
    ) -> Result<BoardChange, BoardError> {
        if self.widgets.contains_key(&id) {
            return Err(BoardError::DuplicateWidget(id));
        }
        self.check_size(size)?;

        let index = index.min(self.len());
        let (key, mut keys) = self.key_for_slot(index, None);
        let position = placement::find_next_available_position(size, &self.positions(), self.columns);

        self.apply_keys(&keys);
        self.widgets
            .insert(id, Widget::new(id, key).with_position(position));
        self.sort();

        keys.push(KeyUpdate::new(id, key));
        info!(widget:% = id, key:% = key, position:% = position; "Added widget");

        Ok(BoardChange {
            keys,
            positions: vec![PositionUpdate::new(id, position)],
        })
    }

    /// Moves a widget to `index` in display order (drag and drop reordering).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownWidget`] if the widget is not on the board.
    pub fn reorder(&mut self, id: WidgetId, index: usize) -> Result<BoardChange, BoardError> {
        let current = self.index_of(id).ok_or(BoardError::UnknownWidget(id))?;
        let index = index.min(self.len() - 1);
        if index == current {
            return Ok(BoardChange::default());
        }

        let (key, mut keys) = self.key_for_slot(index, Some(id));
        self.apply_keys(&keys);
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.set_order(key);
        }
        self.sort();

        keys.push(KeyUpdate::new(id, key));
        debug!(widget:% = id, from = current, to = index; "Reordered widget");

        Ok(BoardChange {
            keys,
            positions: Vec::new(),
        })
    }

    /// Moves a widget to a new rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget is unknown, or the rectangle is empty,
    /// out of bounds or collides with another widget.
    pub fn move_to(&mut self, id: WidgetId, position: GridPosition) -> Result<BoardChange, BoardError> {
        if !self.widgets.contains_key(&id) {
            return Err(BoardError::UnknownWidget(id));
        }
        placement::validate_position(position, self.widgets.values(), Some(id), self.columns)?;

        self.set_position(id, position);
        debug!(widget:% = id, position:% = position; "Moved widget");

        Ok(BoardChange {
            keys: Vec::new(),
            positions: vec![PositionUpdate::new(id, position)],
        })
    }

    /// Resizes a widget in place, keeping its top-left cell.
    ///
    /// An unplaced widget is placed in the first free slot instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget is unknown, or the resized rectangle is
    /// empty, out of bounds or collides with another widget.
    pub fn resize(&mut self, id: WidgetId, size: GridSize) -> Result<BoardChange, BoardError> {
        let widget = self.widgets.get(&id).ok_or(BoardError::UnknownWidget(id))?;

        let position = match widget.position() {
            Some(current) => current.with_size(size),
            None => {
                self.check_size(size)?;
                placement::find_next_available_position(size, &self.positions(), self.columns)
            }
        };

        self.move_to(id, position)
    }

    /// Removes a widget from the board. Other widgets keep their keys and
    /// rectangles.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownWidget`] if the widget is not on the board.
    pub fn remove(&mut self, id: WidgetId) -> Result<Widget, BoardError> {
        let widget = self
            .widgets
            .shift_remove(&id)
            .ok_or(BoardError::UnknownWidget(id))?;
        debug!(widget:% = id; "Removed widget");
        Ok(widget)
    }

    /// Rewrites all keys evenly spaced.
    pub fn reorganize(&mut self) -> BoardChange {
        let widgets: Vec<Widget> = self.widgets.values().copied().collect();
        let keys = self.changed_keys(ordering::reorganize(&widgets, &self.config));
        self.apply_keys(&keys);

        BoardChange {
            keys,
            positions: Vec::new(),
        }
    }

    /// Switches to a grid of `columns` columns and re-places widgets that no
    /// longer fit. See [`responsive::reflow`].
    pub fn set_columns(&mut self, columns: u32) -> BoardChange {
        info!(from = self.columns, to = columns; "Changing column count");
        self.columns = columns;
        self.reflow()
    }

    /// Places unplaced widgets and moves widgets that do not fit the current
    /// column count. Valid rectangles are left alone.
    pub fn reflow(&mut self) -> BoardChange {
        let widgets: Vec<Widget> = self.widgets.values().copied().collect();
        let positions = responsive::reflow(&widgets, self.columns);
        for update in &positions {
            self.set_position(update.id(), update.position());
        }

        BoardChange {
            keys: Vec::new(),
            positions,
        }
    }

    /// Consumes the board, returning its widgets in display order.
    pub fn into_widgets(self) -> Vec<Widget> {
        self.widgets.into_values().collect()
    }

    /// Finds a key for display index `slot` among all widgets except `skip`.
    ///
    /// Falls back to reorganizing around the slot when the neighbours leave
    /// no room; the second value lists the keys that reorganization changed.
    fn key_for_slot(&self, slot: usize, skip: Option<WidgetId>) -> (OrderKey, Vec<KeyUpdate>) {
        let others: Vec<Widget> = self
            .widgets
            .values()
            .filter(|widget| Some(widget.id()) != skip)
            .copied()
            .collect();

        let before = slot.checked_sub(1).and_then(|i| others.get(i)).map(Widget::order);
        let after = others.get(slot).map(Widget::order);

        match ordering::allocate(before, after, &self.config) {
            Ok(key) => (key, Vec::new()),
            Err(err) => {
                debug!(error:% = err, slot; "Reorganizing order keys");
                let (updates, key) = ordering::reorganize_with_slot(&others, slot, &self.config);
                (key, self.changed_keys(updates))
            }
        }
    }

    /// Drops updates that assign a widget the key it already has.
    fn changed_keys(&self, updates: Vec<KeyUpdate>) -> Vec<KeyUpdate> {
        updates
            .into_iter()
            .filter(|update| {
                self.widgets
                    .get(&update.id())
                    .is_none_or(|widget| widget.order() != update.key())
            })
            .collect()
    }

    fn apply_keys(&mut self, updates: &[KeyUpdate]) {
        for update in updates {
            if let Some(widget) = self.widgets.get_mut(&update.id()) {
                widget.set_order(update.key());
            }
        }
        self.sort();
    }

    fn set_position(&mut self, id: WidgetId, position: GridPosition) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.set_position(Some(position));
        }
    }

    fn positions(&self) -> Vec<GridPosition> {
        self.widgets.values().filter_map(Widget::position).collect()
    }

    fn check_size(&self, size: GridSize) -> Result<(), PlacementError> {
        if size.is_empty() {
            return Err(PlacementError::ZeroSize { size });
        }
        let origin = GridPosition::at(0, 0, size);
        if !origin.fits_columns(self.columns) {
            return Err(PlacementError::OutOfBounds {
                position: origin,
                right: origin.right(),
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Restores display order after keys changed. Stable, so widgets with
    /// equal keys keep their relative order.
    fn sort(&mut self) {
        self.widgets.sort_by(|_, a, _, b| a.order().cmp(&b.order()));
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32, u32),
        Insert(usize, u32, u32),
        Reorder(usize, usize),
        Remove(usize),
    }

    // ===================
    // Strategies
    // ===================

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u32..=4, 1u32..=3).prop_map(|(w, h)| Op::Add(w, h)),
            (0usize..30, 1u32..=4, 1u32..=3).prop_map(|(i, w, h)| Op::Insert(i, w, h)),
            (0usize..30, 0usize..30).prop_map(|(from, to)| Op::Reorder(from, to)),
            (0usize..30).prop_map(Op::Remove),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Keys stay strictly increasing and rectangles never overlap.
    fn check_board_invariants_hold(ops: Vec<Op>) -> Result<(), TestCaseError> {
        let mut board = Board::new(8, OrderingConfig::new(8, 0, 2));
        let mut next = 0;

        for op in ops {
            match op {
                Op::Add(w, h) => {
                    board.add(WidgetId::new(&format!("p{next}")), GridSize::new(w, h))
                        .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    next += 1;
                }
                Op::Insert(index, w, h) => {
                    board.insert_at(WidgetId::new(&format!("p{next}")), GridSize::new(w, h), index)
                        .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    next += 1;
                }
                Op::Reorder(from, to) => {
                    let target = board.widgets().nth(from).map(Widget::id);
                    if let Some(target) = target {
                        board.reorder(target, to)
                            .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    }
                }
                Op::Remove(index) => {
                    let target = board.widgets().nth(index).map(Widget::id);
                    if let Some(target) = target {
                        board.remove(target)
                            .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    }
                }
            }

            let widgets: Vec<&Widget> = board.widgets().collect();
            for pair in widgets.windows(2) {
                prop_assert!(pair[0].order() < pair[1].order());
            }
            for (i, a) in widgets.iter().enumerate() {
                let a = a.position().unwrap();
                prop_assert!(a.fits_columns(board.columns()));
                for b in &widgets[i + 1..] {
                    prop_assert!(!a.overlaps(&b.position().unwrap()));
                }
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn board_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..40)) {
            check_board_invariants_hold(ops)?;
        }
    }
}
