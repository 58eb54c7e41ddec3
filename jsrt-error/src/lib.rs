//! # jsrt-error
//!
//! Unified evaluator errors for the jsrt runtime, and the adapter that turns
//! failures raised by the embedding host into them.
//!
//! ## Design Philosophy
//!
//! - **EvalError**: The single error type that leaves the evaluator
//! - **ErrorKind**: Know what error occurred (e.g., Syntax, Reference, Wrapped)
//! - **WrappedError**: Carry a host failure without losing its message or cause
//! - **wrap_error**: Decide whether to unwrap, pass through, or wrap
//!
//! ## Usage
//!
//! ```rust
//! use jsrt_error::{invoke, wrap_error, ErrorKind};
//!
//! let host_result = invoke("fs.writeFile", || {
//!     Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
//! });
//!
//! let err = wrap_error(host_result.unwrap_err());
//! assert_eq!(err.kind(), ErrorKind::Wrapped);
//! assert_eq!(err.message(), "wrapped error of disk full");
//! ```
//!
//! ## Principles
//!
//! - Evaluator functions return `Result<T, jsrt_error::EvalError>`
//! - Host failures are normalized once, through `wrap_error` or `wrap_err()`
//! - An `EvalError` is never wrapped a second time
//! - The original cause stays reachable through `WrappedError::cause` and [`Wrapper`]

mod error;
mod ext;
mod invocation;
mod kind;
mod localized;
mod wrapped;

pub use error::EvalError;
pub use ext::ResultExt;
pub use invocation::{invoke, InvocationError};
pub use kind::ErrorKind;
pub use localized::LocalizedError;
pub use wrapped::{wrap_error, WrappedError, Wrapper, WRAPPED_PREFIX};

/// Result type alias using the evaluator error
pub type Result<T> = std::result::Result<T, EvalError>;
