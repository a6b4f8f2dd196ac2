//! Price sensitivities read off a finite-difference solution grid.
//!
//! All derivatives are central/backward differences at the spot node
//! `i = M / 2` of the last two time rows. Space derivatives are taken in
//! log-moneyness and converted to spot derivatives:
//!
//! * `Δx = (u(N,i+1) − u(N,i−1)) / 2h`, `delta = Δx / S`
//! * `Γx = (u(N,i+1) − 2u(N,i) + u(N,i−1)) / h²`, `gamma = (Γx − Δx) / S²`
//! * `theta = (u(N−1,i) − u(N,i)) / k / days`, with `days` from
//!   [`Settings::theta_days`]

use bsfd_core::{ensure, Price, Real, Result, Settings};
use bsfd_methods::SolutionGrid;

/// Price and sensitivities of one option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    /// Strike the row refers to.
    pub strike: Price,
    /// Value today at the spot node.
    pub price: Price,
    /// `∂V/∂S`.
    pub delta: Real,
    /// `∂²V/∂S²`.
    pub gamma: Real,
    /// Value change per day of calendar time.
    pub theta: Real,
}

impl Greeks {
    /// Extract Greeks from `solution` using the configured Theta day basis.
    pub fn from_solution(strike: Price, solution: &SolutionGrid) -> Result<Self> {
        Self::with_theta_days(strike, solution, Settings::instance().theta_days())
    }

    /// Extract Greeks with an explicit Theta day basis.
    pub fn with_theta_days(strike: Price, solution: &SolutionGrid, days: Real) -> Result<Self> {
        let grid = solution.grid();
        let n = grid.time_steps();
        let m = grid.space_steps();
        ensure!(m >= 2, "need at least two space steps for Greeks, got {m}");
        ensure!(days > 0.0, "theta day basis must be positive, got {days}");

        let h = grid.space_step();
        let k = grid.time_step();
        let i = grid.spot_index();
        let spot = solution.spot();

        let up = solution.value(n, i + 1);
        let mid = solution.value(n, i);
        let down = solution.value(n, i - 1);

        let delta_x = (up - down) / (2.0 * h);
        let gamma_x = (up - 2.0 * mid + down) / (h * h);
        let theta = (solution.value(n - 1, i) - mid) / k / days;

        Ok(Self {
            strike,
            price: mid,
            delta: delta_x / spot,
            gamma: (gamma_x - delta_x) / (spot * spot),
            theta,
        })
    }

    /// `[strike, price, delta, gamma, theta]`.
    pub fn to_array(&self) -> [Real; 5] {
        [self.strike, self.price, self.delta, self.gamma, self.theta]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bsfd_methods::{solve, BlackScholesParams, ExerciseStyle, Grid, OptionType, VanillaPayoff};

    fn solution(option_type: OptionType) -> SolutionGrid {
        let grid = Grid::symmetric(Grid::auto_half_width(0.2, 1.0, 200, 200), 1.0, 200, 200).unwrap();
        let payoff = VanillaPayoff::new(option_type, 100.0).unwrap();
        solve(
            100.0,
            BlackScholesParams::new(0.05, 0.2),
            &payoff,
            &grid,
            ExerciseStyle::European,
        )
        .unwrap()
    }

    #[test]
    fn price_is_spot_node() {
        let u = solution(OptionType::Call);
        let g = Greeks::with_theta_days(100.0, &u, 360.0).unwrap();
        assert_eq!(g.price, u.price());
        assert_eq!(g.strike, 100.0);
        assert_eq!(g.to_array()[1], g.price);
    }

    #[test]
    fn call_and_put_share_gamma() {
        let c = Greeks::with_theta_days(100.0, &solution(OptionType::Call), 360.0).unwrap();
        let p = Greeks::with_theta_days(100.0, &solution(OptionType::Put), 360.0).unwrap();
        assert_abs_diff_eq!(c.gamma, p.gamma, epsilon = 1e-3);
        assert_abs_diff_eq!(c.delta - p.delta, 1.0, epsilon = 1e-2);
        assert!(c.theta < 0.0);
    }

    #[test]
    fn theta_scales_with_day_basis() {
        let u = solution(OptionType::Call);
        let a = Greeks::with_theta_days(100.0, &u, 360.0).unwrap();
        let b = Greeks::with_theta_days(100.0, &u, 180.0).unwrap();
        assert_abs_diff_eq!(b.theta, 2.0 * a.theta, epsilon = 1e-15);
        assert!(Greeks::with_theta_days(100.0, &u, 0.0).is_err());
    }
}
