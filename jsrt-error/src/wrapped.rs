//! Host failures carried inside the evaluator error type.
//!
//! [`wrap_error`] is the entry point for everything the host raises: it
//! peels reflective [`InvocationError`] layers, passes evaluator errors
//! through untouched and wraps whatever is left in a [`WrappedError`].

use crate::localized::localized_text;
use crate::{EvalError, InvocationError};
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Prefix of every wrapped error message
pub const WRAPPED_PREFIX: &str = "wrapped error of ";

/// Values that stand in for another value and can hand it back.
///
/// Generic unwrapping code in the runtime uses this to reach the original
/// host value without knowing the concrete wrapper type.
pub trait Wrapper {
    /// Get the wrapped value
    fn unwrap(&self) -> &(dyn Any + Send + Sync);
}

/// A host failure adapted to the evaluator error type.
///
/// The cause is owned by the adapter. A backtrace snapshot is taken when the
/// adapter is built; it is empty when backtraces are disabled through
/// `RUST_LIB_BACKTRACE` / `RUST_BACKTRACE` or unsupported on the platform.
pub struct WrappedError {
    cause: anyhow::Error,
    snapshot: Backtrace,
}

impl WrappedError {
    /// Wrap an existing failure
    pub fn new(cause: impl Into<anyhow::Error>) -> Self {
        Self {
            cause: cause.into(),
            snapshot: Backtrace::capture(),
        }
    }

    /// The message, rendered from the cause
    pub fn message(&self) -> String {
        format!("{}{}", WRAPPED_PREFIX, self.cause)
    }

    /// The locale-aware message, rendered from the cause.
    ///
    /// Causes without a localized rendering use their `Display` text.
    pub fn localized_message(&self) -> String {
        format!("{}{}", WRAPPED_PREFIX, localized_text(&self.cause))
    }

    /// The failure passed to [`WrappedError::new`]
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }

    /// Take the cause out, dropping the snapshot
    pub fn into_cause(self) -> anyhow::Error {
        self.cause
    }

    /// Backtrace taken when this adapter was built
    pub fn snapshot(&self) -> &Backtrace {
        &self.snapshot
    }

    /// Check whether the snapshot holds captured frames
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.status() == BacktraceStatus::Captured
    }
}

impl Wrapper for WrappedError {
    fn unwrap(&self) -> &(dyn Any + Send + Sync) {
        &self.cause
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", WRAPPED_PREFIX, self.cause)
    }
}

impl fmt::Debug for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedError")
            .field("cause", &self.cause)
            .field("snapshot", &self.snapshot.status())
            .finish()
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

/// Normalize any failure into an [`EvalError`].
///
/// - Reflective [`InvocationError`]s are replaced by their target, repeatedly,
///   until a non-invocation failure is reached.
/// - An [`EvalError`] (or a bare [`WrappedError`]) is returned as is.
/// - Anything else is wrapped in a new [`WrappedError`].
///
/// Only the outermost error is classified. A failure carrying `anyhow`
/// context is wrapped whole, so neither the context nor the error beneath it
/// is lost.
pub fn wrap_error(failure: impl Into<anyhow::Error>) -> EvalError {
    let mut current = failure.into();
    let mut depth = 0usize;

    let failure = loop {
        match take_outermost::<InvocationError>(current) {
            Ok(invocation) => {
                depth += 1;
                tracing::trace!(member = invocation.member(), depth, "unwrapping invocation failure");
                current = invocation.into_target();
            }
            Err(other) => break other,
        }
    };

    let failure = match take_outermost::<EvalError>(failure) {
        Ok(err) => {
            tracing::debug!(
                kind = %err.kind(),
                script = err.kind().is_script(),
                depth,
                "passing evaluator error through"
            );
            return err;
        }
        Err(other) => other,
    };

    match take_outermost::<WrappedError>(failure) {
        Ok(wrapped) => {
            tracing::debug!(depth, "passing wrapped error through");
            wrapped.into()
        }
        Err(other) => {
            tracing::debug!(cause = %other, depth, "wrapping host failure");
            WrappedError::new(other).into()
        }
    }
}

/// The outermost error of `failure`; a context layer counts as one.
pub(crate) fn outermost(failure: &anyhow::Error) -> &(dyn std::error::Error + 'static) {
    &**failure
}

/// Move `T` out of `failure` when it is the outermost error.
///
/// `anyhow::Error::downcast` also matches the context or the inner error of a
/// context layer, which would drop the other half.
fn take_outermost<T>(failure: anyhow::Error) -> Result<T, anyhow::Error>
where
    T: std::error::Error + Send + Sync + 'static,
{
    if outermost(&failure).is::<T>() {
        failure.downcast::<T>()
    } else {
        Err(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, LocalizedError};

    #[derive(Debug)]
    struct DiskFull;

    impl fmt::Display for DiskFull {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk full")
        }
    }

    impl std::error::Error for DiskFull {}

    #[test]
    fn test_message() {
        let wrapped = WrappedError::new(DiskFull);
        assert_eq!(wrapped.message(), "wrapped error of disk full");
        assert_eq!(wrapped.to_string(), wrapped.message());
    }

    #[test]
    fn test_localized_message_falls_back_to_display() {
        let wrapped = WrappedError::new(DiskFull);
        assert_eq!(wrapped.localized_message(), wrapped.message());
    }

    #[test]
    fn test_localized_message_uses_cause_rendering() {
        let wrapped = WrappedError::new(LocalizedError::new("disk full", "disque plein"));
        assert_eq!(wrapped.message(), "wrapped error of disk full");
        assert_eq!(wrapped.localized_message(), "wrapped error of disque plein");
    }

    #[test]
    fn test_unwrap_is_cause() {
        let wrapped = WrappedError::new(DiskFull);
        let unwrapped = Wrapper::unwrap(&wrapped)
            .downcast_ref::<anyhow::Error>()
            .expect("cause is an anyhow::Error");

        assert!(std::ptr::eq(unwrapped, wrapped.cause()));
        assert!(unwrapped.is::<DiskFull>());
    }

    #[test]
    fn test_context_layer_is_wrapped_whole() {
        let failure = anyhow::Error::new(EvalError::syntax("unexpected token"))
            .context("while loading prelude");
        let err = wrap_error(failure);

        assert_eq!(err.kind(), ErrorKind::Wrapped);
        assert_eq!(err.message(), "wrapped error of while loading prelude");
        assert!(err.wrapped().expect("wrapped").cause().is::<EvalError>());
    }

    #[test]
    fn test_wrap_plain_failure() {
        let err = wrap_error(DiskFull);
        assert_eq!(err.kind(), ErrorKind::Wrapped);
        assert_eq!(err.message(), "wrapped error of disk full");

        let wrapped = err.wrapped().expect("host failure is wrapped");
        assert!(wrapped.cause().is::<DiskFull>());
    }

    #[test]
    fn test_pass_through_eval_error() {
        let err = wrap_error(EvalError::syntax("syntax error").with_operation("parser::parse"));
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "syntax error");
        assert_eq!(err.operation(), "parser::parse");
        assert!(err.wrapped().is_none());
    }

    #[test]
    fn test_bare_wrapped_error_is_not_rewrapped() {
        let err = wrap_error(WrappedError::new(DiskFull));
        let wrapped = err.wrapped().expect("still wrapped");
        assert!(wrapped.cause().is::<DiskFull>());
        assert_eq!(err.message(), "wrapped error of disk full");
    }

    #[test]
    fn test_unwraps_invocation_target() {
        let err = wrap_error(InvocationError::new("File.write", DiskFull));
        let wrapped = err.wrapped().expect("target is wrapped");
        assert!(wrapped.cause().is::<DiskFull>());
    }

    #[test]
    fn test_anyhow_message_failure() {
        let err = wrap_error(anyhow::anyhow!("socket closed"));
        assert_eq!(err.message(), "wrapped error of socket closed");
    }
}
