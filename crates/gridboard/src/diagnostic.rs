//! Diagnostics reported while loading and checking layout files.
//!
//! A [`Diagnostic`] is a single error or warning with an optional
//! [`ErrorCode`], labelled [`Span`]s into the layout source and help text.
//! Loading fails with a [`LayoutError`] carrying every diagnostic found.

mod error_code;
mod label;
mod layout_error;
mod severity;

use std::fmt;

pub use error_code::ErrorCode;
pub use label::{Label, Span};
pub use layout_error::LayoutError;
pub use severity::Severity;

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E204]: widget `radio` overlaps widget `clock`
///   --> board.toml:9:12
///    |
///  9 | position = { col = 1, row = 0, width = 2, height = 1 }
///    |            ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ overlapping rectangle
///    |
///  4 | position = { col = 0, row = 0, width = 2, height = 1 }
///    |            ------------------------------------------- `clock` is here
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use gridboard::diagnostic::{Diagnostic, ErrorCode, Span};
    /// let diag = Diagnostic::error("widget `clock` is defined multiple times")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(40..60), "duplicate id")
    ///     .with_help("widget ids must be unique within a layout");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E200]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Returns true if any diagnostic is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|diag| diag.severity().is_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("overlap")
            .with_label(Span::new(10..20), "here")
            .with_secondary_label(Span::new(0..5), "other widget");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.labels()[1].message(), "other widget");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("widget `a` is defined multiple times").with_code(ErrorCode::E200);
        assert_eq!(
            diag.to_string(),
            "error[E200]: widget `a` is defined multiple times"
        );

        let warn = Diagnostic::warning("keys are crowded");
        assert_eq!(warn.to_string(), "warning: keys are crowded");
    }

    #[test]
    fn test_has_errors() {
        assert!(!has_errors(&[]));
        assert!(!has_errors(&[Diagnostic::warning("w")]));
        assert!(has_errors(&[Diagnostic::warning("w"), Diagnostic::error("e")]));
    }
}
