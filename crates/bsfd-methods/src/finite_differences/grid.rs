//! Uniform space-time grid in log-moneyness.

use bsfd_core::{ensure, Real, Result, Size, Time, Volatility};

/// Discretized domain `[space_lb, space_ub] × [0, maturity]`.
///
/// The space axis is the log-moneyness offset `x = ln(S / spot)`, so the
/// node `x = 0` is the spot itself. Immutable once built; construction
/// validates `space_ub > space_lb`, `maturity > 0`, `time_steps ≥ 1`
/// and `space_steps ≥ 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    space_lb: Real,
    space_ub: Real,
    maturity: Time,
    time_steps: Size,
    space_steps: Size,
}

impl Grid {
    /// Grid over `[space_lb, space_ub]` with `time_steps` (N) time and
    /// `space_steps` (M) space subintervals.
    pub fn new(
        space_lb: Real,
        space_ub: Real,
        maturity: Time,
        time_steps: Size,
        space_steps: Size,
    ) -> Result<Self> {
        ensure!(
            space_lb.is_finite() && space_ub.is_finite(),
            "space bounds must be finite, got [{space_lb}, {space_ub}]"
        );
        ensure!(
            space_ub > space_lb,
            "space upper bound ({space_ub}) must exceed lower bound ({space_lb})"
        );
        ensure!(
            maturity > 0.0 && maturity.is_finite(),
            "maturity must be positive, got {maturity}"
        );
        ensure!(time_steps >= 1, "time_steps must be >= 1, got {time_steps}");
        ensure!(space_steps >= 2, "space_steps must be >= 2, got {space_steps}");
        Ok(Self {
            space_lb,
            space_ub,
            maturity,
            time_steps,
            space_steps,
        })
    }

    /// Symmetric grid over `[-half_width, half_width]`.
    pub fn symmetric(
        half_width: Real,
        maturity: Time,
        time_steps: Size,
        space_steps: Size,
    ) -> Result<Self> {
        Self::new(-half_width, half_width, maturity, time_steps, space_steps)
    }

    /// Half-width used when the caller does not pick one:
    /// `B = ½·v·M·√(3·T/N)`.
    ///
    /// The result ties the space step to the time step (`h = v·√(3k)`).
    /// Whether the domain is wide enough for the Dirichlet boundaries to
    /// be accurate is left to the caller.
    pub fn auto_half_width(
        volatility: Volatility,
        maturity: Time,
        time_steps: Size,
        space_steps: Size,
    ) -> Real {
        0.5 * volatility * space_steps as Real * (3.0 * maturity / time_steps as Real).sqrt()
    }

    /// Lower bound of the log-moneyness interval.
    pub fn space_lb(&self) -> Real {
        self.space_lb
    }

    /// Upper bound of the log-moneyness interval.
    pub fn space_ub(&self) -> Real {
        self.space_ub
    }

    /// Time horizon in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Number of time steps `N`.
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Number of space steps `M`.
    pub fn space_steps(&self) -> Size {
        self.space_steps
    }

    /// `h = (space_ub − space_lb) / M`.
    pub fn space_step(&self) -> Real {
        (self.space_ub - self.space_lb) / self.space_steps as Real
    }

    /// `k = maturity / N`.
    pub fn time_step(&self) -> Real {
        self.maturity / self.time_steps as Real
    }

    /// `M + 1` evenly spaced points covering `[space_lb, space_ub]`.
    pub fn space_axis(&self) -> Vec<Real> {
        discretize(self.space_lb, self.space_ub, self.space_steps)
    }

    /// `N + 1` evenly spaced points covering `[0, maturity]`.
    pub fn time_axis(&self) -> Vec<Real> {
        discretize(0.0, self.maturity, self.time_steps)
    }

    /// Column of the spot node, `M / 2`.
    ///
    /// Lands exactly on `x = 0` only for a symmetric grid with even `M`.
    pub fn spot_index(&self) -> Size {
        self.space_steps / 2
    }
}

impl Default for Grid {
    /// `[-1, 1]`, one trading week, 10 × 10 steps.
    fn default() -> Self {
        Self {
            space_lb: -1.0,
            space_ub: 1.0,
            maturity: 5.0 / 252.0,
            time_steps: 10,
            space_steps: 10,
        }
    }
}

/// `n + 1` points `a + i·(b − a)/n`.
fn discretize(a: Real, b: Real, n: Size) -> Vec<Real> {
    let h = (b - a) / n as Real;
    (0..=n).map(|i| a + i as Real * h).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn step_sizes() {
        let g = Grid::new(-2.0, 1.0, 0.5, 50, 30).unwrap();
        assert_abs_diff_eq!(g.space_step(), 0.1, epsilon = 1e-15);
        assert_abs_diff_eq!(g.time_step(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn space_axis_covers_interval() {
        let g = Grid::symmetric(1.5, 1.0, 10, 12).unwrap();
        let x = g.space_axis();
        assert_eq!(x.len(), 13);
        assert_eq!(x[0], -1.5);
        assert_abs_diff_eq!(x[12], 1.5, epsilon = 1e-14);
        for w in x.windows(2) {
            assert_abs_diff_eq!(w[1] - w[0], g.space_step(), epsilon = 1e-14);
        }
        assert_abs_diff_eq!(x[g.spot_index()], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn time_axis_covers_maturity() {
        let g = Grid::symmetric(1.0, 2.0, 8, 4).unwrap();
        let t = g.time_axis();
        assert_eq!(t.len(), 9);
        assert_eq!(t[0], 0.0);
        assert_abs_diff_eq!(t[8], 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(t[1], g.time_step(), epsilon = 1e-15);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        assert!(Grid::new(1.0, 1.0, 1.0, 10, 10).is_err());
        assert!(Grid::new(1.0, -1.0, 1.0, 10, 10).is_err());
        assert!(Grid::symmetric(1.0, 0.0, 10, 10).is_err());
        assert!(Grid::symmetric(1.0, -1.0, 10, 10).is_err());
        assert!(Grid::symmetric(1.0, 1.0, 0, 10).is_err());
        assert!(Grid::symmetric(1.0, 1.0, 10, 1).is_err());
        assert!(Grid::symmetric(Real::NAN, 1.0, 10, 10).is_err());
        assert!(Grid::symmetric(-1.0, 1.0, 10, 10).is_err());
    }

    #[test]
    fn default_grid() {
        let g = Grid::default();
        assert_eq!(g.space_axis().len(), 11);
        assert_abs_diff_eq!(g.space_step(), 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(g.maturity(), 5.0 / 252.0, epsilon = 1e-15);
    }

    #[test]
    fn auto_half_width_formula() {
        // 0.5 · 0.2 · 200 · √(3 · 1 / 200)
        let b = Grid::auto_half_width(0.2, 1.0, 200, 200);
        assert_abs_diff_eq!(b, 20.0 * (0.015_f64).sqrt(), epsilon = 1e-14);
        let g = Grid::symmetric(b, 1.0, 200, 200).unwrap();
        assert_abs_diff_eq!(g.space_step(), 0.2 * (3.0 * g.time_step()).sqrt(), epsilon = 1e-14);
    }
}
