//! Floating-point comparison utilities.

use bsfd_core::Real;

/// Largest absolute element-wise difference between two equally sized slices.
///
/// Returns `Real::INFINITY` when the lengths differ.
pub fn max_abs_diff(a: &[Real], b: &[Real]) -> Real {
    if a.len() != b.len() {
        return Real::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, Real::max)
}
