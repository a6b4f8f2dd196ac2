//! # bsfd
//!
//! Prices European and American vanilla options by solving the
//! Black-Scholes PDE with a fully implicit finite-difference scheme in
//! log-moneyness, and reads Greeks off the resulting solution grid.
//!
//! This crate is a façade that re-exports the workspace crates.
//!
//! ## Quick start
//!
//! ```rust
//! use bsfd::methods::{BlackScholesParams, OptionType};
//! use bsfd::pricingengines::FdBlackScholesEngine;
//!
//! let engine = FdBlackScholesEngine::new(BlackScholesParams::new(0.05, 0.2))
//!     .with_resolution(200, 200);
//! let price = engine.price(100.0, 1.0, 100.0, OptionType::Call)?;
//! assert!((price - 10.45).abs() < 0.1);
//! # Ok::<(), bsfd::core::Error>(())
//! ```
//!
//! ## Flat entry points
//!
//! ```rust
//! let u = bsfd::black_scholes_pde(100.0, 1.0, 100.0, "put", &[0.05, 0.2], 50, 60, true, 1.5)?;
//! assert_eq!(u.matrix().rows(), 51);
//! assert!(bsfd::black_scholes_pde(100.0, 1.0, 100.0, "digital", &[0.05, 0.2], 50, 60, true, 1.5).is_err());
//! # Ok::<(), bsfd::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and settings.
pub use bsfd_core as core;

/// Tridiagonal solvers, matrices, distributions.
pub use bsfd_math as math;

/// Grid, payoff, and the implicit PDE solver.
pub use bsfd_methods as methods;

/// Finite-difference and analytic engines, batches, and Greeks.
pub use bsfd_pricingengines as pricingengines;

pub use bsfd_core::{Error, Result};
pub use bsfd_pricingengines::{
    black_scholes_greeks, black_scholes_greeks_chain, black_scholes_pde, black_scholes_pde_chain,
    black_scholes_pde_surface, FdBlackScholesEngine, Greeks, PriceSurface,
};
