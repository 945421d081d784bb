//! Gridboard - widget ordering and grid placement for dashboards.
//!
//! Widgets on a board are sorted by integer order keys handed out with large
//! gaps, so an insertion between two widgets touches only the new widget until
//! a gap is exhausted and the board is reorganized. Each widget occupies a
//! rectangle of grid cells; rectangles never overlap and never extend past the
//! column count of the active breakpoint.
//!
//! The algorithms live in [`ordering`], [`placement`] and [`responsive`] and
//! work on plain slices. [`Board`] composes them into a widget collection, and
//! [`LayoutBuilder`] loads and saves boards as TOML layout files.

pub mod board;
pub mod config;
pub mod diagnostic;
pub mod layout_file;
pub mod ordering;
pub mod placement;
pub mod responsive;

mod error;

pub use gridboard_core::{breakpoint, geometry, identifier, order, widget};

pub use board::{Board, BoardChange, BoardError};
pub use error::GridboardError;
pub use layout_file::LayoutFile;

use log::{debug, info, trace};

use config::AppConfig;
use diagnostic::Diagnostic;

/// Builder for loading, checking and saving layout files.
///
/// # Examples
///
/// ```
/// use gridboard::{LayoutBuilder, config::AppConfig, geometry::GridSize, identifier::WidgetId};
///
/// let source = r#"
/// columns = 4
///
/// [[widgets]]
/// id = "clock"
/// order = 0
/// position = { col = 0, row = 0, width = 2, height = 1 }
/// "#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let mut board = builder.load(source).expect("Failed to load");
///
/// board.add(WidgetId::new("radio"), GridSize::new(2, 1)).expect("Failed to add");
///
/// let saved = builder.save(&board).expect("Failed to save");
/// assert!(saved.contains("radio"));
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including ordering and grid settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and check a layout, returning every diagnostic found.
    ///
    /// Unlike [`LayoutBuilder::load`], board invariant violations are
    /// returned as diagnostics rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns `GridboardError::Layout` if the source cannot be parsed.
    pub fn check(&self, source: &str) -> Result<Vec<Diagnostic>, GridboardError> {
        info!("Checking layout");

        let layout = LayoutFile::parse(source)
            .map_err(|err| GridboardError::new_layout_error(err, source))?;
        let diagnostics = layout_file::check(&layout, &self.config);

        info!(diagnostics = diagnostics.len(); "Layout checked");
        Ok(diagnostics)
    }

    /// Parse a layout into a board, placing unplaced widgets.
    ///
    /// # Errors
    ///
    /// Returns `GridboardError::Layout` for syntax errors or violated board
    /// invariants.
    pub fn load(&self, source: &str) -> Result<Board, GridboardError> {
        info!("Loading layout");

        let board = LayoutFile::parse(source)
            .and_then(|layout| layout.into_board(&self.config))
            .map_err(|err| GridboardError::new_layout_error(err, source))?;

        debug!(widgets = board.len(), columns = board.columns(); "Layout loaded");
        trace!(board:?; "Loaded board");
        Ok(board)
    }

    /// Serialize a board to layout TOML.
    ///
    /// # Errors
    ///
    /// Returns `GridboardError::Serialize` if the board cannot be written.
    pub fn save(&self, board: &Board) -> Result<String, GridboardError> {
        let toml = LayoutFile::from_board(board).to_toml()?;
        debug!(bytes = toml.len(); "Layout serialized");
        Ok(toml)
    }
}
