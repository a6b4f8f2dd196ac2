//! Fully implicit finite-difference solver for the Black-Scholes PDE.
//!
//! Solves `∂u/∂t + r·s·∂u/∂s + ½v²s²·∂²u/∂s² − r·u = 0` on a uniform
//! log-moneyness [`Grid`]. Row `i` of the returned [`SolutionGrid`] holds
//! the option value `i·k` years before maturity, so row 0 is the payoff and
//! row `N` is the value today.
//!
//! Boundary columns are Dirichlet, pinned to the payoff at the two ends of
//! the domain for every time step. The boundary contribution injected into
//! the right-hand side is taken from row 0, and the American projection is
//! against the payoff at column `j − 1`; both are part of the scheme and
//! must not be changed to their time-updated counterparts.

use bsfd_core::{ensure, Price, Rate, Real, Result, Size, Volatility};
use bsfd_math::{ConstTridiagonal, Matrix};
use tracing::{debug, warn};

use super::grid::Grid;
use super::payoff::VanillaPayoff;

/// Exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExerciseStyle {
    /// Exercise at maturity only.
    #[default]
    European,
    /// Exercise at any time up to maturity.
    American,
}

impl ExerciseStyle {
    /// `true` for [`ExerciseStyle::American`].
    pub fn is_american(self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl From<bool> for ExerciseStyle {
    /// `true` → American, `false` → European.
    fn from(american: bool) -> Self {
        if american {
            ExerciseStyle::American
        } else {
            ExerciseStyle::European
        }
    }
}

/// Constant model parameters: risk-free rate `r` and volatility `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesParams {
    /// Continuously compounded risk-free rate.
    pub rate: Rate,
    /// Lognormal volatility.
    pub volatility: Volatility,
}

impl BlackScholesParams {
    /// Create from rate and volatility.
    pub fn new(rate: Rate, volatility: Volatility) -> Self {
        Self { rate, volatility }
    }

    /// Create from a `[r, v, ..]` slice. Entries past the second are ignored.
    pub fn from_slice(param: &[Real]) -> Result<Self> {
        ensure!(
            param.len() >= 2,
            "expected parameters [rate, volatility], got {} values",
            param.len()
        );
        let params = Self::new(param[0], param[1]);
        params.validate()?;
        Ok(params)
    }

    /// Check that the rate is finite and the volatility finite and non-negative.
    ///
    /// Only `v²` enters the operator, so a negative volatility would
    /// otherwise price exactly like its absolute value.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.volatility >= 0.0 && self.volatility.is_finite(),
            "volatility must be finite and non-negative, got {}",
            self.volatility
        );
        Ok(())
    }
}

/// Coefficients of the discretized log-space operator.
///
/// With `a = (r − ½v²)/(2h)` and `b = v²/(2h²)`:
/// `alpha = b − a`, `beta = −r − 2b`, `delta = a + b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorCoefficients {
    /// Weight of the left neighbour.
    pub alpha: Real,
    /// Weight of the node itself.
    pub beta: Real,
    /// Weight of the right neighbour.
    pub delta: Real,
}

impl OperatorCoefficients {
    /// Coefficients for space step `h`.
    pub fn new(params: BlackScholesParams, h: Real) -> Self {
        let r = params.rate;
        let v2 = params.volatility * params.volatility;
        let a = (r - 0.5 * v2) / (2.0 * h);
        let b = v2 / (2.0 * h * h);
        Self {
            alpha: b - a,
            beta: -r - 2.0 * b,
            delta: a + b,
        }
    }

    /// The implicit step matrix `I − k·L` over `size` interior nodes:
    /// `lower = −k·alpha`, `diag = 1 − k·beta`, `upper = −k·delta`.
    pub fn implicit_system(&self, k: Real, size: Size) -> Result<ConstTridiagonal> {
        ConstTridiagonal::new(-k * self.alpha, 1.0 - k * self.beta, -k * self.delta, size)
    }
}

/// The `(N+1) × (M+1)` value surface produced by [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionGrid {
    values: Matrix,
    grid: Grid,
    spot: Price,
}

impl SolutionGrid {
    /// Value at time row `i`, space column `j`.
    pub fn value(&self, i: Size, j: Size) -> Real {
        self.values[(i, j)]
    }

    /// Copy of time row `i`.
    pub fn row(&self, i: Size) -> Vec<Real> {
        self.values.row(i)
    }

    /// Value today at the spot node: row `N`, column `M / 2`.
    pub fn price(&self) -> Price {
        self.values[(self.grid.time_steps(), self.grid.spot_index())]
    }

    /// Grid the solution was computed on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Spot the log-moneyness axis is centred on.
    pub fn spot(&self) -> Price {
        self.spot
    }

    /// Borrow the raw matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.values
    }

    /// Consume and return the raw matrix.
    pub fn into_matrix(self) -> Matrix {
        self.values
    }
}

/// Run the implicit scheme and return the full solution grid.
///
/// Requires `M ≥ 3`, a positive finite spot and parameters that pass
/// [`BlackScholesParams::validate`]. Zero volatility is allowed. An odd `M`
/// is accepted but the spot node `M / 2` then sits half a step off `x = 0`.
/// A step matrix that still degenerates during elimination shows up as
/// [`bsfd_core::Error::SingularPivot`].
pub fn solve(
    spot: Price,
    params: BlackScholesParams,
    payoff: &VanillaPayoff,
    grid: &Grid,
    exercise: ExerciseStyle,
) -> Result<SolutionGrid> {
    ensure!(spot > 0.0 && spot.is_finite(), "spot must be positive, got {spot}");
    params.validate()?;
    let n = grid.time_steps();
    let m = grid.space_steps();
    ensure!(m >= 3, "space_steps must be >= 3, got {m}");
    if m % 2 == 1 {
        warn!(space_steps = m, "odd space resolution: spot node is off-centre");
    }

    let h = grid.space_step();
    let k = grid.time_step();
    let x = grid.space_axis();
    let p = payoff.evaluate(spot, &x);

    let mut u = Matrix::zeros(n + 1, m + 1);
    // Initial condition: payoff
    u.set_row(0, &p);
    // Boundary conditions: payoff at both ends
    for i in 0..=n {
        u[(i, 0)] = p[0];
        u[(i, m)] = p[m];
    }

    let coeffs = OperatorCoefficients::new(params, h);
    let system = coeffs.implicit_system(k, m - 1)?;
    debug!(
        %payoff,
        ?exercise,
        n,
        m,
        h,
        k,
        alpha = coeffs.alpha,
        beta = coeffs.beta,
        delta = coeffs.delta,
        "implicit Black-Scholes solve"
    );

    let left = k * coeffs.alpha * u[(0, 0)];
    let right = k * coeffs.delta * u[(0, m)];
    let mut rhs = vec![0.0; m - 1];
    let mut sol = vec![0.0; m - 1];

    for i in 1..=n {
        for (j, d) in rhs.iter_mut().enumerate() {
            *d = u[(i - 1, j + 1)];
        }
        rhs[0] += left;
        rhs[m - 2] += right;

        system.solve_into(&rhs, &mut sol)?;

        for j in 1..m {
            u[(i, j)] = match exercise {
                ExerciseStyle::American => sol[j - 1].max(p[j - 1]),
                ExerciseStyle::European => sol[j - 1],
            };
        }
    }

    Ok(SolutionGrid {
        values: u,
        grid: *grid,
        spot,
    })
}
