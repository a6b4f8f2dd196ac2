//! Structural properties of the implicit scheme that hold for any
//! well-posed parameter set.

use bsfd_methods::{solve, BlackScholesParams, ExerciseStyle, Grid, OptionType, VanillaPayoff};
use proptest::prelude::*;

fn grid() -> Grid {
    Grid::symmetric(1.5, 1.0, 60, 80).unwrap()
}

#[test]
fn call_values_increase_with_spot_node() {
    let payoff = VanillaPayoff::new(OptionType::Call, 100.0).unwrap();
    let u = solve(
        100.0,
        BlackScholesParams::new(0.05, 0.2),
        &payoff,
        &grid(),
        ExerciseStyle::European,
    )
    .unwrap();
    let today = u.row(60);
    for w in today.windows(2) {
        assert!(w[1] >= w[0] - 1e-12, "call row not monotone: {w:?}");
    }
}

#[test]
fn time_axis_length_matches_solution_rows() {
    let g = grid();
    let payoff = VanillaPayoff::new(OptionType::Put, 100.0).unwrap();
    let u = solve(100.0, BlackScholesParams::new(0.01, 0.4), &payoff, &g, ExerciseStyle::European)
        .unwrap();
    assert_eq!(g.time_axis().len(), u.matrix().rows());
    assert_eq!(g.space_axis().len(), u.matrix().cols());
}

#[test]
fn unsupported_payoff_type_fails_before_solving() {
    assert!(matches!(
        VanillaPayoff::parse(100.0, "butterfly"),
        Err(bsfd_core::Error::UnsupportedPayoff(name)) if name == "butterfly"
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn american_put_never_below_european(
        strike in 60.0f64..140.0,
        rate in 0.005f64..0.10,
        vol in 0.1f64..0.6,
        maturity in 0.1f64..2.0,
    ) {
        let g = Grid::symmetric(1.5, maturity, 40, 60).unwrap();
        let params = BlackScholesParams::new(rate, vol);
        let payoff = VanillaPayoff::new(OptionType::Put, strike).unwrap();
        let eu = solve(100.0, params, &payoff, &g, ExerciseStyle::European).unwrap();
        let am = solve(100.0, params, &payoff, &g, ExerciseStyle::American).unwrap();
        prop_assert!(am.price() >= eu.price() - 1e-12);
    }
}
