//! Error types for bsfd.
//!
//! All failures in the workspace are expressed through a single
//! `thiserror`-derived enum. Configuration checks go through the `ensure!`
//! macro defined here; numerical failures of the tridiagonal solvers have
//! their own variants so that callers can tell a bad parameter set apart
//! from an ill-posed linear system.

use thiserror::Error;

use crate::Real;

/// The top-level error type used throughout bsfd.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated (invalid configuration).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A tridiagonal system was asked to solve an empty right-hand side.
    #[error("tridiagonal system must have at least one row")]
    EmptySystem,

    /// A vector length did not match the size of the system it was fed to.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Zero, near-zero or non-finite pivot met during Thomas elimination.
    #[error("singular pivot {pivot:e} at row {row} during tridiagonal elimination")]
    SingularPivot {
        /// Row at which elimination broke down.
        row: usize,
        /// Offending pivot value.
        pivot: Real,
    },

    /// Payoff type string not recognised.
    #[error("unsupported payoff type: {0:?} (expected \"call\" or \"put\")")]
    UnsupportedPayoff(String),
}

impl Error {
    /// `true` for failures raised by the linear solver rather than by
    /// parameter validation.
    pub fn is_numerical(&self) -> bool {
        matches!(self, Error::SingularPivot { .. } | Error::EmptySystem)
    }
}

/// Shorthand `Result` type used throughout bsfd.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bsfd_core::ensure;
/// fn positive(x: f64) -> bsfd_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
