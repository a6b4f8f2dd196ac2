//! Finite-difference Black-Scholes engine.
//!
//! [`FdBlackScholesEngine`] bundles the model parameters, grid resolution,
//! exercise style and domain width for a pricing run, and exposes single
//! option, chain (vector of strikes) and surface (strikes × maturities)
//! pricing on top of [`bsfd_methods::solve`].
//!
//! Batch calls run each `(strike, maturity)` task independently on the
//! rayon pool. Each task builds its own payoff and solver, and its outcome
//! is reported on its own, so one failing strike does not affect the
//! others.
//!
//! The flat functions at the bottom of this module ([`black_scholes_pde`]
//! and friends) take loosely typed arguments (type name, `[r, v]` slice,
//! `american` flag) for callers embedding the engine in another runtime.

use bsfd_core::{Error, Price, Real, Result, Settings, Size, Time};
use bsfd_methods::{
    solve, BlackScholesParams, ExerciseStyle, Grid, OptionType, SolutionGrid, VanillaPayoff,
};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::greeks::Greeks;

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Configuration of a finite-difference pricing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdBlackScholesEngine {
    params: BlackScholesParams,
    time_steps: Size,
    space_steps: Size,
    exercise: ExerciseStyle,
    half_width: Option<Real>,
}

impl FdBlackScholesEngine {
    /// Engine with the default resolution from [`Settings`], European
    /// exercise and an automatically derived domain width.
    pub fn new(params: BlackScholesParams) -> Self {
        let (time_steps, space_steps) = Settings::instance().default_resolution();
        Self {
            params,
            time_steps,
            space_steps,
            exercise: ExerciseStyle::European,
            half_width: None,
        }
    }

    /// Set the number of time steps `N` and space steps `M`.
    pub fn with_resolution(mut self, time_steps: Size, space_steps: Size) -> Self {
        self.time_steps = time_steps;
        self.space_steps = space_steps;
        self
    }

    /// Set the exercise style.
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Fix the log-moneyness domain to `[-half_width, half_width]`.
    pub fn with_half_width(mut self, half_width: Real) -> Self {
        self.half_width = Some(half_width);
        self
    }

    /// Model parameters.
    pub fn params(&self) -> BlackScholesParams {
        self.params
    }

    /// Exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// `(N, M)`.
    pub fn resolution(&self) -> (Size, Size) {
        (self.time_steps, self.space_steps)
    }

    /// Domain half-width for `maturity`: the fixed one if set, otherwise
    /// [`Grid::auto_half_width`].
    pub fn half_width(&self, maturity: Time) -> Real {
        self.half_width.unwrap_or_else(|| {
            Grid::auto_half_width(
                self.params.volatility,
                maturity,
                self.time_steps,
                self.space_steps,
            )
        })
    }

    /// The grid used for `maturity`.
    pub fn grid(&self, maturity: Time) -> Result<Grid> {
        Grid::symmetric(
            self.half_width(maturity),
            maturity,
            self.time_steps,
            self.space_steps,
        )
    }

    /// Full solution grid for one option.
    pub fn solution(
        &self,
        strike: Price,
        maturity: Time,
        spot: Price,
        option_type: OptionType,
    ) -> Result<SolutionGrid> {
        let grid = self.grid(maturity)?;
        self.solve_on(&grid, strike, spot, option_type)
    }

    /// Value today at the spot node for one option.
    pub fn price(
        &self,
        strike: Price,
        maturity: Time,
        spot: Price,
        option_type: OptionType,
    ) -> Result<Price> {
        Ok(self.solution(strike, maturity, spot, option_type)?.price())
    }

    /// Price and Greeks for one option.
    pub fn greeks(
        &self,
        strike: Price,
        maturity: Time,
        spot: Price,
        option_type: OptionType,
    ) -> Result<Greeks> {
        let u = self.solution(strike, maturity, spot, option_type)?;
        Greeks::from_solution(strike, &u)
    }

    /// Prices for every strike at a common maturity, in input order.
    ///
    /// All strikes share one grid. A grid that cannot be built fails every
    /// element with the same error.
    pub fn price_chain(
        &self,
        strikes: &[Price],
        maturity: Time,
        spot: Price,
        option_type: OptionType,
    ) -> Vec<Result<Price>> {
        self.map_chain(strikes, maturity, |grid, strike| {
            Ok(self.solve_on(grid, strike, spot, option_type)?.price())
        })
    }

    /// Greeks for every strike at a common maturity, in input order.
    pub fn greeks_chain(
        &self,
        strikes: &[Price],
        maturity: Time,
        spot: Price,
        option_type: OptionType,
    ) -> Vec<Result<Greeks>> {
        self.map_chain(strikes, maturity, |grid, strike| {
            let u = self.solve_on(grid, strike, spot, option_type)?;
            Greeks::from_solution(strike, &u)
        })
    }

    /// Prices over `strikes × maturities`. Each maturity gets its own grid.
    pub fn price_surface(
        &self,
        strikes: &[Price],
        maturities: &[Time],
        spot: Price,
        option_type: OptionType,
    ) -> PriceSurface {
        debug!(
            strikes = strikes.len(),
            maturities = maturities.len(),
            "pricing surface"
        );
        let columns: Vec<Vec<Result<Price>>> = maturities
            .par_iter()
            .map(|&maturity| self.price_chain(strikes, maturity, spot, option_type))
            .collect();

        let mut values = Vec::with_capacity(strikes.len() * maturities.len());
        for i in 0..strikes.len() {
            for column in &columns {
                values.push(column[i].clone());
            }
        }
        PriceSurface {
            strikes: strikes.to_vec(),
            maturities: maturities.to_vec(),
            values,
        }
    }

    fn solve_on(
        &self,
        grid: &Grid,
        strike: Price,
        spot: Price,
        option_type: OptionType,
    ) -> Result<SolutionGrid> {
        let payoff = VanillaPayoff::new(option_type, strike)?;
        solve(spot, self.params, &payoff, grid, self.exercise)
    }

    fn map_chain<T, F>(&self, strikes: &[Price], maturity: Time, task: F) -> Vec<Result<T>>
    where
        T: Send,
        F: Fn(&Grid, Price) -> Result<T> + Sync,
    {
        let grid = match self.grid(maturity) {
            Ok(grid) => grid,
            Err(e) => {
                warn!(maturity, error = %e, "invalid grid for chain");
                return strikes.iter().map(|_| Err(e.clone())).collect();
            }
        };
        debug!(
            strikes = strikes.len(),
            maturity,
            half_width = grid.space_ub(),
            "pricing chain"
        );
        strikes
            .par_iter()
            .map(|&strike| {
                trace!(strike, maturity, "chain element");
                let result = task(&grid, strike);
                if let Err(e) = &result {
                    warn!(strike, maturity, error = %e, "chain element failed");
                }
                result
            })
            .collect()
    }
}

// ─── Price surface ───────────────────────────────────────────────────────────

/// Prices on a `strikes × maturities` lattice, one result per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSurface {
    strikes: Vec<Price>,
    maturities: Vec<Time>,
    /// Strike-major: cell `(i, j)` at `i * maturities.len() + j`.
    values: Vec<Result<Price>>,
}

impl PriceSurface {
    /// Strike axis (rows).
    pub fn strikes(&self) -> &[Price] {
        &self.strikes
    }

    /// Maturity axis (columns).
    pub fn maturities(&self) -> &[Time] {
        &self.maturities
    }

    /// Result for strike `i`, maturity `j`.
    pub fn get(&self, i: Size, j: Size) -> Option<&Result<Price>> {
        if i >= self.strikes.len() || j >= self.maturities.len() {
            return None;
        }
        self.values.get(i * self.maturities.len() + j)
    }

    /// Every cell that failed, as `(strike index, maturity index, error)`.
    pub fn failures(&self) -> impl Iterator<Item = (Size, Size, &Error)> + '_ {
        let cols = self.maturities.len();
        self.values
            .iter()
            .enumerate()
            .filter_map(move |(idx, r)| r.as_ref().err().map(|e| (idx / cols, idx % cols, e)))
    }

    /// `true` if every cell priced.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Result::is_ok)
    }

    /// Prices for maturity `j` across all strikes.
    pub fn column(&self, j: Size) -> Vec<&Result<Price>> {
        (0..self.strikes.len())
            .filter_map(|i| self.get(i, j))
            .collect()
    }
}

// ─── Flat entry points ───────────────────────────────────────────────────────

fn engine_from_raw(
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
) -> Result<FdBlackScholesEngine> {
    Ok(
        FdBlackScholesEngine::new(BlackScholesParams::from_slice(param)?)
            .with_resolution(time_steps, space_steps)
            .with_exercise(ExerciseStyle::from(american)),
    )
}

/// Full `(N+1) × (M+1)` solution for one option on `[-half_width, half_width]`.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_pde(
    strike: Price,
    maturity: Time,
    spot: Price,
    option_type: &str,
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
    half_width: Real,
) -> Result<SolutionGrid> {
    let option_type: OptionType = option_type.parse()?;
    engine_from_raw(param, time_steps, space_steps, american)?
        .with_half_width(half_width)
        .solution(strike, maturity, spot, option_type)
}

/// Prices for a vector of strikes with the automatic half-width.
///
/// The outer `Result` rejects arguments shared by the whole chain (type
/// name, parameter vector); the inner ones are per strike.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_pde_chain(
    strikes: &[Price],
    maturity: Time,
    spot: Price,
    option_type: &str,
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
) -> Result<Vec<Result<Price>>> {
    let option_type: OptionType = option_type.parse()?;
    Ok(engine_from_raw(param, time_steps, space_steps, american)?
        .price_chain(strikes, maturity, spot, option_type))
}

/// Prices over `strikes × maturities` with the automatic half-width.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_pde_surface(
    strikes: &[Price],
    maturities: &[Time],
    spot: Price,
    option_type: &str,
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
) -> Result<PriceSurface> {
    let option_type: OptionType = option_type.parse()?;
    Ok(engine_from_raw(param, time_steps, space_steps, american)?
        .price_surface(strikes, maturities, spot, option_type))
}

/// Price and Greeks for one option with the automatic half-width.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_greeks(
    strike: Price,
    maturity: Time,
    spot: Price,
    option_type: &str,
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
) -> Result<Greeks> {
    let option_type: OptionType = option_type.parse()?;
    engine_from_raw(param, time_steps, space_steps, american)?
        .greeks(strike, maturity, spot, option_type)
}

/// Greeks for a vector of strikes with the automatic half-width.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_greeks_chain(
    strikes: &[Price],
    maturity: Time,
    spot: Price,
    option_type: &str,
    param: &[Real],
    time_steps: Size,
    space_steps: Size,
    american: bool,
) -> Result<Vec<Result<Greeks>>> {
    let option_type: OptionType = option_type.parse()?;
    Ok(engine_from_raw(param, time_steps, space_steps, american)?
        .greeks_chain(strikes, maturity, spot, option_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn engine() -> FdBlackScholesEngine {
        FdBlackScholesEngine::new(BlackScholesParams::new(0.05, 0.2)).with_resolution(100, 100)
    }

    #[test]
    fn builder_sets_fields() {
        let e = engine()
            .with_exercise(ExerciseStyle::American)
            .with_half_width(1.5);
        assert_eq!(e.resolution(), (100, 100));
        assert!(e.exercise().is_american());
        assert_eq!(e.half_width(3.0), 1.5);
        assert_eq!(e.grid(1.0).unwrap().space_lb(), -1.5);
    }

    #[test]
    fn auto_half_width_depends_on_maturity() {
        let e = engine();
        assert_abs_diff_eq!(
            e.half_width(1.0),
            Grid::auto_half_width(0.2, 1.0, 100, 100),
            epsilon = 1e-15
        );
        assert!(e.half_width(2.0) > e.half_width(1.0));
    }

    #[test]
    fn chain_reports_bad_strike_per_element() {
        let prices = engine().price_chain(&[90.0, -1.0, 110.0], 1.0, 100.0, OptionType::Call);
        assert_eq!(prices.len(), 3);
        assert!(prices[0].is_ok());
        assert!(matches!(prices[1], Err(Error::Precondition(_))));
        assert!(prices[2].is_ok());
        assert!(prices[0].as_ref().unwrap() > prices[2].as_ref().unwrap());
    }

    #[test]
    fn chain_with_invalid_maturity_fails_every_element() {
        let prices = engine().price_chain(&[90.0, 100.0], 0.0, 100.0, OptionType::Put);
        assert!(prices.iter().all(|p| matches!(p, Err(Error::Precondition(_)))));
    }

    #[test]
    fn empty_chain_is_empty() {
        assert!(engine()
            .price_chain(&[], 1.0, 100.0, OptionType::Call)
            .is_empty());
    }

    #[test]
    fn surface_layout_and_failures() {
        let strikes = [90.0, 0.0, 110.0];
        let maturities = [0.5, 1.0];
        let s = engine().price_surface(&strikes, &maturities, 100.0, OptionType::Call);
        assert_eq!(s.strikes(), &strikes);
        assert_eq!(s.maturities(), &maturities);
        assert!(!s.is_complete());
        let failed: Vec<_> = s.failures().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(failed, vec![(1, 0), (1, 1)]);
        assert!(s.get(3, 0).is_none());
        assert!(s.get(0, 2).is_none());
        assert_eq!(s.column(1).len(), 3);

        let short = *s.get(0, 0).unwrap().as_ref().unwrap();
        let long = *s.get(0, 1).unwrap().as_ref().unwrap();
        assert!(long > short);
    }

    #[test]
    fn flat_entry_points_reject_bad_shared_arguments() {
        assert!(matches!(
            black_scholes_pde(100.0, 1.0, 100.0, "binary", &[0.05, 0.2], 10, 10, false, 1.0),
            Err(Error::UnsupportedPayoff(_))
        ));
        assert!(matches!(
            black_scholes_pde_chain(&[100.0], 1.0, 100.0, "call", &[0.05], 10, 10, false),
            Err(Error::Precondition(_))
        ));
        assert!(matches!(
            black_scholes_pde_chain(&[100.0], 1.0, 100.0, "call", &[0.05, -0.2], 10, 10, false),
            Err(Error::Precondition(_))
        ));
        assert!(black_scholes_pde_surface(&[100.0], &[1.0], 100.0, "swap", &[0.05, 0.2], 10, 10, true)
            .is_err());
    }

    #[test]
    fn flat_pde_uses_given_half_width() {
        let u = black_scholes_pde(100.0, 1.0, 100.0, "put", &[0.05, 0.2], 20, 40, true, 2.0).unwrap();
        assert_eq!(u.grid().space_ub(), 2.0);
        assert_eq!(u.matrix().rows(), 21);
        assert_eq!(u.matrix().cols(), 41);
    }
}
