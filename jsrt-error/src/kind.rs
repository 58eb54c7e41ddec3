//! Error kinds for evaluator errors

use std::fmt;

/// The kind of evaluator error that occurred.
///
/// Callers match on `ErrorKind` to decide how to report a failure to script
/// code. Failures that originate in the host and could not be classified any
/// further surface as [`ErrorKind::Wrapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Internal invariant of the evaluator was violated
    Internal,

    // =========================================================================
    // Script errors
    // =========================================================================
    /// Source text could not be parsed
    Syntax,

    /// Reference to an undefined name
    Reference,

    /// Operation applied to a value of the wrong type
    Type,

    /// Numeric value outside of its allowed range
    Range,

    // =========================================================================
    // Host errors
    // =========================================================================
    /// A host failure carried as the cause of a wrapped error
    Wrapped,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::Internal => "Internal",

            ErrorKind::Syntax => "Syntax",
            ErrorKind::Reference => "Reference",
            ErrorKind::Type => "Type",
            ErrorKind::Range => "Range",

            ErrorKind::Wrapped => "Wrapped",
        }
    }

    /// Check if this kind originates in script code rather than the host
    pub fn is_script(&self) -> bool {
        matches!(
            self,
            ErrorKind::Syntax | ErrorKind::Reference | ErrorKind::Type | ErrorKind::Range
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
