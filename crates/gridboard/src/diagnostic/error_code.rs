//! Error codes for layout diagnostics.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Reading the layout file
//! - `E2xx` - Board invariant violations
//! - `W3xx` - Warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Reading Errors (E1xx)
    // =========================================================================
    /// Malformed layout file.
    ///
    /// The file is not valid TOML, or a value has the wrong type. Negative
    /// coordinates and sizes are reported here.
    E100,

    /// Invalid grid header.
    ///
    /// `columns` is zero, or `breakpoint` names no known breakpoint.
    E101,

    // =========================================================================
    // Board Errors (E2xx)
    // =========================================================================
    /// Duplicate widget id.
    E200,

    /// Duplicate order key.
    ///
    /// Two widgets share a key, so their relative order is undefined.
    E201,

    /// Empty widget size.
    ///
    /// A position has a width or height of zero.
    E202,

    /// Widget out of bounds.
    ///
    /// A position extends past the last column of the grid.
    E203,

    /// Overlapping widgets.
    E204,

    // =========================================================================
    // Warnings (W3xx)
    // =========================================================================
    /// Crowded order keys.
    ///
    /// Adjacent keys are closer than the configured minimum spacing, so the
    /// next insertion between them will trigger a reorganization.
    W300,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::W300 => "W300",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed layout file",
            ErrorCode::E101 => "invalid grid header",
            ErrorCode::E200 => "duplicate widget id",
            ErrorCode::E201 => "duplicate order key",
            ErrorCode::E202 => "empty widget size",
            ErrorCode::E203 => "widget out of bounds",
            ErrorCode::E204 => "overlapping widgets",
            ErrorCode::W300 => "crowded order keys",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
