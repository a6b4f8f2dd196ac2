//! # bsfd-methods
//!
//! Numerical methods: the finite-difference grid, vanilla payoff, and the
//! implicit Black-Scholes PDE solver.
//!
//! # Modules
//!
//! * [`finite_differences`]: grid, payoff, implicit time stepping

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: grid, payoff, implicit PDE solver.
pub mod finite_differences;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    solve, BlackScholesParams, ExerciseStyle, Grid, OperatorCoefficients, OptionType,
    SolutionGrid, VanillaPayoff,
};
