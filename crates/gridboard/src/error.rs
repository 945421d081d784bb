//! Error types for Gridboard operations.
//!
//! This module provides the main error type [`GridboardError`] which wraps
//! the error conditions that can occur while loading, editing and saving a
//! board.

use std::io;

use thiserror::Error;

use crate::{board::BoardError, diagnostic::LayoutError};

/// The main error type for Gridboard operations.
///
/// # Diagnostic Variants
///
/// The `Layout` variant carries diagnostics with spans into the layout
/// source, and keeps the source itself so the spans can be rendered.
#[derive(Debug, Error)]
pub enum GridboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Layout { err: LayoutError, src: String },

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GridboardError {
    /// Create a new `Layout` error with the associated source.
    pub fn new_layout_error(err: LayoutError, src: impl Into<String>) -> Self {
        Self::Layout {
            err,
            src: src.into(),
        }
    }
}
