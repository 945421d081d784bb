//! Reading, checking and writing TOML layout files.
//!
//! A layout file stores one board: the grid it is laid out on and every
//! widget with its order key and (optionally) its rectangle.
//!
//! ```toml
//! breakpoint = "desktop"   # or `columns = 8`
//!
//! [[widgets]]
//! id = "clock"
//! order = 0
//! position = { col = 0, row = 0, width = 2, height = 1 }
//!
//! [[widgets]]
//! id = "notes"             # no position: placed in the first free slot
//! order = 1000
//! ```
//!
//! [`LayoutFile::parse`] keeps the source span of every value so that
//! [`check`] can point at the offending entries.

use std::collections::{HashMap, hash_map::Entry};

use log::debug;
use serde::{Deserialize, Serialize};
use toml::Spanned;

use gridboard_core::{
    breakpoint::Breakpoint,
    geometry::GridPosition,
    identifier::WidgetId,
    order::OrderKey,
    widget::Widget,
};

use crate::{
    board::Board,
    config::{AppConfig, GridConfig},
    diagnostic::{Diagnostic, ErrorCode, LayoutError, Span, has_errors},
    ordering,
    placement::{self, PlacementError},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    columns: Option<Spanned<u32>>,
    breakpoint: Option<Spanned<String>>,
    #[serde(default)]
    widgets: Vec<Spanned<RawWidget>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWidget {
    id: Spanned<String>,
    order: Spanned<i64>,
    position: Option<Spanned<GridPosition>>,
}

#[derive(Debug, Serialize)]
struct SavedLayout<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakpoint: Option<Breakpoint>,
    widgets: Vec<&'a Widget>,
}

/// One `[[widgets]]` entry and where it came from.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    widget: Widget,
    span: Span,
    id_span: Span,
    order_span: Span,
    position_span: Option<Span>,
}

impl LayoutEntry {
    fn new(widget: Widget) -> Self {
        Self {
            widget,
            span: Span::default(),
            id_span: Span::default(),
            order_span: Span::default(),
            position_span: None,
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Returns the span of the whole entry
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn id_span(&self) -> Span {
        self.id_span
    }

    pub fn order_span(&self) -> Span {
        self.order_span
    }

    /// Returns the span of the `position` value, or of the whole entry if
    /// the widget is unplaced
    pub fn position_span(&self) -> Span {
        self.position_span.unwrap_or(self.span)
    }
}

/// A parsed layout file.
#[derive(Debug, Clone, Default)]
pub struct LayoutFile {
    columns: Option<u32>,
    breakpoint: Option<Breakpoint>,
    entries: Vec<LayoutEntry>,
}

impl LayoutFile {
    /// Parses a layout from TOML source.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] with an `E100` diagnostic for malformed
    /// TOML or mistyped values, and `E101` for an invalid grid header.
    /// Board invariants are not checked here; see [`check`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridboard::layout_file::LayoutFile;
    /// let layout = LayoutFile::parse(r#"
    /// columns = 4
    ///
    /// [[widgets]]
    /// id = "clock"
    /// order = 0
    /// position = { col = 0, row = 0, width = 2, height = 1 }
    /// "#).unwrap();
    ///
    /// assert_eq!(layout.entries().len(), 1);
    /// assert_eq!(layout.entries()[0].widget().id(), "clock");
    /// ```
    pub fn parse(src: &str) -> Result<Self, LayoutError> {
        let raw: RawLayout = toml::from_str(src).map_err(|err| {
            let span = err.span().map(Span::new).unwrap_or_default();
            Diagnostic::error(format!("invalid layout file: {}", err.message().trim_end()))
                .with_code(ErrorCode::E100)
                .with_label(span, "here")
        })?;

        let columns = match raw.columns {
            Some(columns) if *columns.get_ref() == 0 => {
                return Err(Diagnostic::error("a grid needs at least one column")
                    .with_code(ErrorCode::E101)
                    .with_label(Span::new(columns.span()), "zero columns")
                    .into());
            }
            columns => columns.map(Spanned::into_inner),
        };

        let breakpoint = match raw.breakpoint {
            Some(name) => {
                let span = Span::new(name.span());
                let breakpoint = name.get_ref().parse::<Breakpoint>().map_err(|err| {
                    Diagnostic::error(err)
                        .with_code(ErrorCode::E101)
                        .with_label(span, "unknown breakpoint")
                        .with_help("expected one of `mobile`, `tablet`, `desktop`")
                })?;
                Some(breakpoint)
            }
            None => None,
        };

        let entries = raw
            .widgets
            .into_iter()
            .map(|entry| {
                let span = Span::new(entry.span());
                let raw = entry.into_inner();
                let id = WidgetId::new(raw.id.get_ref());
                let order = OrderKey::new(*raw.order.get_ref());

                let mut widget = Widget::new(id, order);
                widget.set_position(raw.position.as_ref().map(|position| *position.get_ref()));

                LayoutEntry {
                    widget,
                    span,
                    id_span: Span::new(raw.id.span()),
                    order_span: Span::new(raw.order.span()),
                    position_span: raw.position.map(|position| Span::new(position.span())),
                }
            })
            .collect::<Vec<_>>();

        debug!(widgets = entries.len(); "Parsed layout file");
        Ok(Self {
            columns,
            breakpoint,
            entries,
        })
    }

    /// Captures the current state of a board. The file stores the board's
    /// column count explicitly.
    pub fn from_board(board: &Board) -> Self {
        Self {
            columns: Some(board.columns()),
            breakpoint: None,
            entries: board.widgets().copied().map(LayoutEntry::new).collect(),
        }
    }

    /// Returns the explicit column count, if the file sets one
    pub fn explicit_columns(&self) -> Option<u32> {
        self.columns
    }

    /// Returns the breakpoint named by the file, if any
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.breakpoint
    }

    /// Resolves the column count of this layout.
    ///
    /// An explicit `columns` wins over `breakpoint`; without either the
    /// default breakpoint is used.
    pub fn columns(&self, grid: &GridConfig) -> u32 {
        self.columns
            .unwrap_or_else(|| grid.columns(self.breakpoint.unwrap_or_default()))
    }

    /// Returns the widget entries in file order
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Iterates over the widgets in file order.
    pub fn widgets(&self) -> impl Iterator<Item = Widget> + '_ {
        self.entries.iter().map(|entry| entry.widget)
    }

    /// Checks the layout and builds a board from it, placing unplaced widgets.
    ///
    /// # Errors
    ///
    /// Returns every diagnostic from [`check`] if any of them is an error.
    pub fn into_board(&self, config: &AppConfig) -> Result<Board, LayoutError> {
        let diagnostics = check(self, config);
        if has_errors(&diagnostics) {
            return Err(LayoutError::new(diagnostics));
        }

        let columns = self.columns(config.grid());
        let mut board = Board::from_widgets(self.widgets(), columns, *config.ordering())
            .map_err(|err| Diagnostic::error(err.to_string()).with_code(ErrorCode::E200))?;
        board.reflow();
        Ok(board)
    }

    /// Serializes the layout back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer rejects the layout.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let saved = SavedLayout {
            columns: self.columns,
            breakpoint: self.breakpoint,
            widgets: self.entries.iter().map(|entry| &entry.widget).collect(),
        };
        toml::to_string(&saved)
    }
}

/// Checks a layout for violations of the board invariants.
///
/// Errors: duplicate ids (`E200`), duplicate order keys (`E201`), empty
/// sizes (`E202`), rectangles past the last column (`E203`) and overlapping
/// rectangles (`E204`). Adjacent keys closer than the configured minimum
/// spacing produce a `W300` warning.
///
/// Each rectangle is checked against the valid rectangles of the entries
/// before it, so an overlap is reported once, on the later entry.
pub fn check(layout: &LayoutFile, config: &AppConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    check_duplicates(layout, &mut diagnostics);
    check_positions(layout, layout.columns(config.grid()), &mut diagnostics);
    check_spacing(layout, config, &mut diagnostics);

    debug!(diagnostics = diagnostics.len(); "Checked layout");
    diagnostics
}

fn check_duplicates(layout: &LayoutFile, diagnostics: &mut Vec<Diagnostic>) {
    let mut ids: HashMap<WidgetId, &LayoutEntry> = HashMap::new();
    let mut keys: HashMap<OrderKey, &LayoutEntry> = HashMap::new();

    for entry in layout.entries() {
        match ids.entry(entry.widget.id()) {
            Entry::Occupied(first) => diagnostics.push(
                Diagnostic::error(format!(
                    "widget `{}` is defined multiple times",
                    entry.widget.id()
                ))
                .with_code(ErrorCode::E200)
                .with_label(entry.id_span, "duplicate id")
                .with_secondary_label(first.get().id_span, "first defined here")
                .with_help("widget ids must be unique within a layout"),
            ),
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }

        match keys.entry(entry.widget.order()) {
            Entry::Occupied(first) => diagnostics.push(
                Diagnostic::error(format!(
                    "widgets `{}` and `{}` share order key {}",
                    first.get().widget.id(),
                    entry.widget.id(),
                    entry.widget.order()
                ))
                .with_code(ErrorCode::E201)
                .with_label(entry.order_span, "duplicate key")
                .with_secondary_label(first.get().order_span, "first used here")
                .with_help("give each widget a distinct key, or reorganize the board"),
            ),
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
}

fn check_positions(layout: &LayoutFile, columns: u32, diagnostics: &mut Vec<Diagnostic>) {
    // Rectangles that passed so far, with their entry
    let mut accepted: Vec<((WidgetId, GridPosition), &LayoutEntry)> = Vec::new();

    for entry in layout.entries() {
        let Some(position) = entry.widget.position() else {
            continue;
        };
        let id = entry.widget.id();

        let result = placement::validate_position(
            position,
            accepted.iter().map(|(placed, _)| placed),
            None,
            columns,
        );

        match result {
            Ok(()) => accepted.push(((id, position), entry)),
            Err(PlacementError::ZeroSize { size }) => diagnostics.push(
                Diagnostic::error(format!("widget `{id}` has empty size {size}"))
                    .with_code(ErrorCode::E202)
                    .with_label(entry.position_span(), "empty rectangle")
                    .with_help("width and height must be at least 1"),
            ),
            Err(PlacementError::OutOfBounds { right, columns, .. }) => diagnostics.push(
                Diagnostic::error(format!(
                    "widget `{id}` ends at column {right}, past the {columns} available columns"
                ))
                .with_code(ErrorCode::E203)
                .with_label(entry.position_span(), "out of bounds"),
            ),
            Err(PlacementError::Collision { other, .. }) => {
                let mut diag = Diagnostic::error(format!("widget `{id}` overlaps widget `{other}`"))
                    .with_code(ErrorCode::E204)
                    .with_label(entry.position_span(), "overlapping rectangle");
                if let Some((_, first)) = accepted.iter().find(|((placed, _), _)| *placed == other) {
                    diag = diag.with_secondary_label(first.position_span(), format!("`{other}` is here"));
                }
                diagnostics.push(diag);
            }
        }
    }
}

fn check_spacing(layout: &LayoutFile, config: &AppConfig, diagnostics: &mut Vec<Diagnostic>) {
    let spacing = config.ordering();
    if !ordering::needs_reorganization(layout.widgets().map(|widget| widget.order()), spacing) {
        return;
    }

    let mut sorted: Vec<&LayoutEntry> = layout.entries().iter().collect();
    sorted.sort_by_key(|entry| entry.widget.order());

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        // Equal keys are reported as duplicates
        let crowded = second
            .widget
            .order()
            .distance_from(first.widget.order())
            .is_some_and(|gap| gap > 0 && gap < spacing.min_spacing());

        if crowded {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "order keys of `{}` and `{}` leave no room for an insertion",
                    first.widget.id(),
                    second.widget.id()
                ))
                .with_code(ErrorCode::W300)
                .with_label(second.order_span, "too close")
                .with_secondary_label(first.order_span, "previous key")
                .with_help("reorganize the board to respace all keys evenly"),
            );
        }
    }
}
