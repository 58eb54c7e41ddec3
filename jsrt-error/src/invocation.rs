//! Failures raised while invoking host members reflectively

use crate::Wrapper;
use std::any::Any;
use std::fmt;

/// Invoking a host member raised `target`.
///
/// The invocation layer itself carries no diagnostic value once the target
/// is known, so [`wrap_error`](crate::wrap_error) discards it.
pub struct InvocationError {
    member: String,
    target: anyhow::Error,
}

impl InvocationError {
    /// Record that invoking `member` raised `target`
    pub fn new(member: impl Into<String>, target: impl Into<anyhow::Error>) -> Self {
        Self {
            member: member.into(),
            target: target.into(),
        }
    }

    /// Name of the member that was invoked
    pub fn member(&self) -> &str {
        &self.member
    }

    /// The failure raised by the member
    pub fn target(&self) -> &anyhow::Error {
        &self.target
    }

    /// Take the target out, discarding the invocation layer
    pub fn into_target(self) -> anyhow::Error {
        self.target
    }
}

/// Call a host member, attributing its failure to `member`.
pub fn invoke<T, E>(
    member: &str,
    call: impl FnOnce() -> Result<T, E>,
) -> Result<T, InvocationError>
where
    E: Into<anyhow::Error>,
{
    call().map_err(|target| InvocationError::new(member, target))
}

impl Wrapper for InvocationError {
    fn unwrap(&self) -> &(dyn Any + Send + Sync) {
        &self.target
    }
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invocation of `{}` failed", self.member)
    }
}

impl fmt::Debug for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationError")
            .field("member", &self.member)
            .field("target", &self.target)
            .finish()
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.target)
    }
}
