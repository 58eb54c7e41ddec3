//! Normalizing host results at call sites

use crate::{wrap_error, Result};

/// Extension for results coming back from host code.
pub trait ResultExt<T> {
    /// Normalize the error through [`wrap_error`]
    fn wrap_err(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn wrap_err(self) -> Result<T> {
        self.map_err(wrap_error)
    }
}
