//! Host failures with a locale-aware rendering

use crate::wrapped::outermost;
use crate::EvalError;
use std::fmt;

/// A host failure that carries translated text next to its default message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedError {
    message: String,
    localized: String,
}

impl LocalizedError {
    /// Create a failure with its default and translated text
    pub fn new(message: impl Into<String>, localized: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            localized: localized.into(),
        }
    }

    /// Get the default message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the translated message
    pub fn localized(&self) -> &str {
        &self.localized
    }
}

impl fmt::Display for LocalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LocalizedError {}

/// Locale-aware text of a cause, or its `Display` text.
pub(crate) fn localized_text(cause: &anyhow::Error) -> String {
    let outer = outermost(cause);
    if let Some(localized) = outer.downcast_ref::<LocalizedError>() {
        localized.localized().to_string()
    } else if let Some(err) = outer.downcast_ref::<EvalError>() {
        err.localized_message().into_owned()
    } else {
        cause.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text() {
        let cause = anyhow::Error::new(LocalizedError::new("not found", "introuvable"));
        assert_eq!(localized_text(&cause), "introuvable");
        assert_eq!(cause.to_string(), "not found");
    }

    #[test]
    fn test_localized_text_fallback() {
        let cause = anyhow::anyhow!("timeout");
        assert_eq!(localized_text(&cause), "timeout");

        let cause = anyhow::Error::new(EvalError::syntax("missing )"));
        assert_eq!(localized_text(&cause), "missing )");
    }

    #[test]
    fn test_localized_text_keeps_context() {
        let cause = anyhow::Error::new(LocalizedError::new("not found", "introuvable"))
            .context("loading locale");
        assert_eq!(localized_text(&cause), "loading locale");
    }
}
