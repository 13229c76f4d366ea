//! Structured error type for the document kernel.
//!
//! Every fallible operation in this crate returns [`TextError`] rather than a boxed
//! `dyn Error` or a bare `String`: callers (and tests) need to match on *kind*, not parse
//! message text.

use std::fmt;

/// How serious the error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Operation failed but the document is unchanged and usable.
    Error,
    /// Operation failed and the document may be left in a degraded (but still valid) state.
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What kind of error occurred. One variant per error kind enumerated for the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document this point/iterator/handle referred to has been disposed.
    DocumentDisposed,
    /// The document (or the accessible region of it) is read-only.
    ReadOnly,
    /// An edit was attempted outside the document's accessible (narrowed) region.
    DocumentAccessViolation,
    /// A position or region argument was out of the document's raw bounds.
    BadPosition,
    /// A `DocumentInput` collaborator vetoed the change, or `replace` was called reentrantly
    /// from within a listener callback.
    ChangeRejected,
    /// A code point was outside 0..=0x10FFFF or fell in the surrogate range.
    InvalidScalarValue,
    /// A UTF-8/16 byte or code-unit sequence was not well-formed.
    MalformedInput,
    /// A search pattern failed to parse (literal escape, regex syntax, ...).
    PatternSyntax,
    /// An interactive replace-all was interrupted by the callback or an I/O failure below it.
    ReplacementInterrupted,
    /// Iteration or lookup found nothing where the caller required an element.
    NoSuchElement,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DocumentDisposed => "DocumentDisposed",
            Self::ReadOnly => "ReadOnly",
            Self::DocumentAccessViolation => "DocumentAccessViolation",
            Self::BadPosition => "BadPosition",
            Self::ChangeRejected => "ChangeRejected",
            Self::InvalidScalarValue => "InvalidScalarValue",
            Self::MalformedInput => "MalformedInput",
            Self::PatternSyntax => "PatternSyntax",
            Self::ReplacementInterrupted => "ReplacementInterrupted",
            Self::NoSuchElement => "NoSuchElement",
        };
        write!(f, "{s}")
    }
}

/// A structured kernel error: severity, kind, machine-readable code, human message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextError {
    pub severity: ErrorSeverity,
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl TextError {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn critical(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }

    pub fn document_disposed() -> Self {
        Self::new(
            ErrorKind::DocumentDisposed,
            "DOCUMENT_DISPOSED",
            "the document no longer exists",
        )
    }

    pub fn read_only() -> Self {
        Self::new(ErrorKind::ReadOnly, "READ_ONLY", "the document is read-only")
    }

    pub fn access_violation() -> Self {
        Self::new(
            ErrorKind::DocumentAccessViolation,
            "ACCESS_VIOLATION",
            "position lies outside the accessible region",
        )
    }

    pub fn bad_position(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadPosition, "BAD_POSITION", message)
    }

    pub fn change_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ChangeRejected, "CHANGE_REJECTED", message)
    }

    pub fn no_such_element(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoSuchElement, "NO_SUCH_ELEMENT", message)
    }

    pub fn replacement_interrupted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReplacementInterrupted, "REPLACEMENT_INTERRUPTED", message)
    }
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for TextError {}

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
