//! Finite difference methods for Black-Scholes option pricing.
//!
//! # Overview
//!
//! * [`Grid`]: uniform log-moneyness × time grid
//! * [`VanillaPayoff`]: call/put terminal condition over the space axis
//! * [`solve`]: fully implicit time stepping with optional American
//!   early-exercise projection, returning a [`SolutionGrid`]
//!
//! The tridiagonal step matrix has constant bands, so it is factored once
//! per solve ([`bsfd_math::ConstTridiagonal`]) and reused for every time step.

pub mod grid;
pub mod implicit;
pub mod payoff;

pub use grid::Grid;
pub use implicit::{solve, BlackScholesParams, ExerciseStyle, OperatorCoefficients, SolutionGrid};
pub use payoff::{OptionType, VanillaPayoff};
