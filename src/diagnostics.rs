//! Diagnostic Infrastructure
//!
//! This module provides infrastructure for collecting and formatting
//! conversion problems. Conversion operates on a semantic graph rather than
//! source text, so diagnostics carry the name of the affected entity instead
//! of a file span.
//!
//! # Components
//!
//! - `Diagnostic` - A single diagnostic message with severity and code
//! - `DiagnosticBag` - A collection of diagnostics for one conversion run
//! - `DiagnosticSeverity` - Error, Warning, Info, or Hint
//!
//! # Example
//!
//! ```ignore
//! let mut bag = DiagnosticBag::new();
//! bag.error("Foo", "class tag used without a constructible value", codes::NOT_CONSTRUCTIBLE);
//! bag.warning("Bar", "unhandled symbol categories", codes::UNHANDLED_CATEGORY);
//!
//! for diag in bag.iter() {
//!     println!("{diag}");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic codes emitted by the converter.
///
/// Fatal invariant violations panic instead of producing a code; everything
/// here is recoverable or informational.
pub mod codes {
    /// A symbol carried category bits no converter in the priority table handled.
    pub const UNHANDLED_CATEGORY: u32 = 1001;
    /// A class-shape tag was used on a value with no construct signatures.
    pub const NOT_CONSTRUCTIBLE: u32 = 1002;
    /// Type conversion exceeded the recursion limit.
    pub const TYPE_RECURSION_LIMIT: u32 = 1003;
    /// A reference could not be resolved by id or by name.
    pub const UNRESOLVED_REFERENCE: u32 = 1004;
    /// A type shape had no recognized category and fell back to text.
    pub const UNSUPPORTED_TYPE_SHAPE: u32 = 1005;
    /// A named type expanded back into itself and was cut off.
    pub const CIRCULAR_TYPE: u32 = 1006;
    /// A comment lookup failed; the entity converts without documentation.
    pub const COMMENT_LOOKUP_FAILED: u32 = 1007;
}

// =============================================================================
// Diagnostic Severity
// =============================================================================

/// The severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A hint (lowest severity)
    Hint = 4,
    /// Informational message
    Info = 3,
    /// A warning
    Warning = 2,
    /// An error (highest severity)
    Error = 1,
}

impl DiagnosticSeverity {
    /// Get the severity name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Hint => "hint",
        }
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A diagnostic message with severity and code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the symbol or reflection the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    /// The diagnostic message
    pub message: String,
    /// The severity level
    pub severity: DiagnosticSeverity,
    /// The diagnostic code (see [`codes`])
    pub code: u32,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        subject: Option<String>,
        message: impl Into<String>,
        severity: DiagnosticSeverity,
        code: u32,
    ) -> Self {
        Diagnostic {
            subject,
            message: message.into(),
            severity,
            code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(
                f,
                "{} TR{}: {}: {}",
                self.severity, self.code, subject, self.message
            ),
            None => write!(f, "{} TR{}: {}", self.severity, self.code, self.message),
        }
    }
}

// =============================================================================
// Diagnostic Bag
// =============================================================================

/// A collection of diagnostics for one conversion run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag {
            diagnostics: Vec::new(),
        }
    }

    /// Record an error diagnostic.
    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>, code: u32) {
        self.diagnostics.push(Diagnostic::new(
            Some(subject.into()),
            message,
            DiagnosticSeverity::Error,
            code,
        ));
    }

    /// Record a warning diagnostic.
    pub fn warning(&mut self, subject: impl Into<String>, message: impl Into<String>, code: u32) {
        self.diagnostics.push(Diagnostic::new(
            Some(subject.into()),
            message,
            DiagnosticSeverity::Warning,
            code,
        ));
    }

    /// Record an info diagnostic with no subject.
    pub fn info(&mut self, message: impl Into<String>, code: u32) {
        self.diagnostics.push(Diagnostic::new(
            None,
            message,
            DiagnosticSeverity::Info,
            code,
        ));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Check whether any error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count diagnostics with the given code.
    pub fn count_code(&self, code: u32) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    /// Merge another bag into this one.
    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_records_and_counts() {
        let mut bag = DiagnosticBag::new();
        bag.warning("Foo", "unhandled symbol categories", codes::UNHANDLED_CATEGORY);
        bag.error("Bar", "class tag without construct signature", codes::NOT_CONSTRUCTIBLE);

        assert_eq!(bag.len(), 2);
        assert!(bag.has_errors());
        assert_eq!(bag.count_code(codes::UNHANDLED_CATEGORY), 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            Some("Foo".to_string()),
            "message",
            DiagnosticSeverity::Error,
            codes::NOT_CONSTRUCTIBLE,
        );
        assert_eq!(diag.to_string(), "error TR1002: Foo: message");
    }
}
