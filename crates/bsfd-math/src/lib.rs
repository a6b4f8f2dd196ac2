//! # bsfd-math
//!
//! Mathematical utilities for the finite-difference pricer: tridiagonal
//! solvers, a dense `Matrix` newtype (over nalgebra), the normal
//! distribution (via statrs), and a residual comparison helper.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Dense matrix newtype.
pub mod matrix;

/// Constant- and variable-coefficient Thomas solvers.
pub mod tridiagonal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::max_abs_diff;
pub use distributions::{normal_cdf, normal_pdf};
pub use matrix::Matrix;
pub use tridiagonal::{trisolve, ConstTridiagonal, TridiagonalOperator};
