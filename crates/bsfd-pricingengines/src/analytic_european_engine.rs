//! Analytic European option pricing (Black-Scholes).
//!
//! Closed-form reference for the finite-difference engine. Computes the
//! price and the sensitivities the FD Greeks extractor reports.

use bsfd_core::{Price, Rate, Real, Time, Volatility};
use bsfd_math::{normal_cdf, normal_pdf};
use bsfd_methods::OptionType;

/// Compute Black-Scholes price and Greeks for a European option on a
/// non-dividend-paying underlying.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// Returns `(price, delta, gamma, theta)`; theta is per year of calendar
/// time.
pub fn black_scholes(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> (Real, Real, Real, Real) {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        let intrinsic = (phi * (spot - strike)).max(0.0);
        return (intrinsic, 0.0, 0.0, 0.0);
    }

    let r = risk_free_rate;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if spot > strike * df_r { 1e15 } else { -1e15 };
        (big, big)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * nd1 - strike * df_r * nd2);
    let delta = phi * nd1;
    let gamma = if std_dev > 1e-15 {
        npd1 / (spot * std_dev)
    } else {
        0.0
    };
    let theta = -(spot * npd1 * sigma) / (2.0 * sqrt_t) - phi * r * strike * df_r * nd2;

    (price, delta, gamma, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let (price, delta, gamma, theta) =
            black_scholes(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert_abs_diff_eq!(price, 10.4506, epsilon = 1e-3);
        assert_abs_diff_eq!(delta, 0.6368, epsilon = 1e-3);
        assert_abs_diff_eq!(gamma, 0.018_76, epsilon = 1e-4);
        assert_abs_diff_eq!(theta, -6.414, epsilon = 1e-2);
    }

    #[test]
    fn bs_put_call_parity() {
        let (call, dc, gc, _) = black_scholes(OptionType::Call, 100.0, 105.0, 0.08, 0.25, 0.5);
        let (put, dp, gp, _) = black_scholes(OptionType::Put, 100.0, 105.0, 0.08, 0.25, 0.5);
        let parity = call - 100.0 + 105.0 * (-0.04_f64).exp();
        assert_abs_diff_eq!(put, parity, epsilon = 1e-10);
        assert_abs_diff_eq!(dc - dp, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(gc, gp, epsilon = 1e-15);
    }

    #[test]
    fn bs_zero_vol_call() {
        let (price, ..) = black_scholes(OptionType::Call, 100.0, 95.0, 0.05, 0.0, 1.0);
        assert_abs_diff_eq!(price, 100.0 - 95.0 * (-0.05_f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn bs_expired_is_intrinsic() {
        let (price, delta, ..) = black_scholes(OptionType::Put, 90.0, 100.0, 0.05, 0.2, 0.0);
        assert_eq!(price, 10.0);
        assert_eq!(delta, 0.0);
    }
}
