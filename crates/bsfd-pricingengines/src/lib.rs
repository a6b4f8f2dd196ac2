//! # bsfd-pricingengines
//!
//! Pricing engines for European and American vanilla options.
//!
//! ## Engines
//!
//! - [`FdBlackScholesEngine`]: implicit finite-difference engine with
//!   single-option, chain and surface pricing
//! - [`Greeks`]: price, delta, gamma and theta read off a solution grid
//! - [`black_scholes`]: closed-form European reference

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod fd_black_scholes_engine;
pub mod greeks;

pub use analytic_european_engine::black_scholes;
pub use fd_black_scholes_engine::{
    black_scholes_greeks, black_scholes_greeks_chain, black_scholes_pde, black_scholes_pde_chain,
    black_scholes_pde_surface, FdBlackScholesEngine, PriceSurface,
};
pub use greeks::Greeks;
