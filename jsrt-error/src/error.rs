//! The unified evaluator error type

use crate::{ErrorKind, WrappedError};
use std::borrow::Cow;
use std::fmt;

/// The unified error type for all evaluator operations.
///
/// Every failure that leaves the evaluator is an `EvalError`:
/// - `kind`: What type of error occurred
/// - `message`: Human-readable description
/// - `operation`: What operation caused the error
/// - `context`: Key-value pairs for debugging
/// - `source`: The underlying error (if any)
/// - `wrapped`: The host failure this error stands in for (if any)
///
/// Host failures enter through [`wrap_error`](crate::wrap_error), which
/// produces an error of kind [`ErrorKind::Wrapped`] whose message is derived
/// from the original cause.
///
/// # Example
///
/// ```rust
/// use jsrt_error::{EvalError, ErrorKind};
///
/// let err = EvalError::new(ErrorKind::Reference, "x is not defined")
///     .with_operation("interpreter::lookup")
///     .with_context("name", "x");
///
/// assert_eq!(err.kind(), ErrorKind::Reference);
/// assert_eq!(err.message(), "x is not defined");
/// ```
pub struct EvalError {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
    wrapped: Option<WrappedError>,
}

impl EvalError {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
            wrapped: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    ///
    /// For wrapped host failures this is rendered from the cause on every call.
    pub fn message(&self) -> Cow<'_, str> {
        match &self.wrapped {
            Some(wrapped) => Cow::Owned(wrapped.message()),
            None => Cow::Borrowed(&self.message),
        }
    }

    /// Get the locale-aware message, falling back to [`message`](Self::message)
    pub fn localized_message(&self) -> Cow<'_, str> {
        match &self.wrapped {
            Some(wrapped) => Cow::Owned(wrapped.localized_message()),
            None => Cow::Borrowed(&self.message),
        }
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    /// Get the wrapped host failure, if this error stands in for one
    pub fn wrapped(&self) -> Option<&WrappedError> {
        self.wrapped.as_ref()
    }

    /// Take the wrapped host failure out, or give the error back unchanged
    pub fn into_wrapped(self) -> Result<WrappedError, Self> {
        match self {
            Self { wrapped: Some(wrapped), .. } => Ok(wrapped),
            other => Err(other),
        }
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(source.into());
        self
    }
}

impl From<WrappedError> for EvalError {
    fn from(wrapped: WrappedError) -> Self {
        Self {
            kind: ErrorKind::Wrapped,
            message: String::new(),
            operation: "",
            context: Vec::new(),
            source: None,
            wrapped: Some(wrapped),
        }
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        let message = self.message();
        if !message.is_empty() {
            write!(f, " => {}", message)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        writeln!(f)?;

        let message = self.message();
        if !message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(wrapped) = &self.wrapped {
            writeln!(f)?;
            writeln!(f, "    Cause: {:?}", wrapped.cause())?;
            writeln!(f, "    Snapshot: {:?}", wrapped.snapshot().status())?;
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.wrapped {
            Some(wrapped) => Some(&**wrapped.cause()),
            None => self
                .source
                .as_ref()
                .map(|e| &**e as &(dyn std::error::Error + 'static)),
        }
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl EvalError {
    /// Create an Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an Unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a Syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    /// Create a Reference error for an undefined name
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ErrorKind::Reference, format!("{} is not defined", name))
            .with_context("name", name)
    }

    /// Create a Type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    /// Create a Range error
    pub fn range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Range, message)
    }
}
