//! Tridiagonal linear systems solved with the Thomas algorithm.
//!
//! * [`ConstTridiagonal`]: every row shares the same `(lower, diag, upper)`
//!   triple. The elimination coefficients depend only on those scalars, so
//!   they are computed once at construction and reused by every solve.
//! * [`TridiagonalOperator`]: general variant with per-row bands.
//!
//! Both report a breakdown of the elimination as
//! [`Error::SingularPivot`] instead of letting `NaN`/`Inf` leak out.

use bsfd_core::{Error, Real, Result};

use crate::matrix::Matrix;

/// Pivots with `|pivot| <= PIVOT_TOLERANCE · max(|lower|, |diag|, |upper|)`
/// are treated as zero.
pub const PIVOT_TOLERANCE: Real = 1e-14;

#[inline]
fn checked_pivot(row: usize, pivot: Real, scale: Real) -> Result<Real> {
    if !pivot.is_finite() || pivot.abs() <= PIVOT_TOLERANCE * scale {
        return Err(Error::SingularPivot { row, pivot });
    }
    Ok(pivot)
}

#[inline]
fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}

// ─── Constant-coefficient system ─────────────────────────────────────────────

/// An `n × n` tridiagonal matrix with constant bands and a cached forward
/// sweep.
///
/// Row 0 reads `diag·x[0] + upper·x[1]`, row `n−1` reads
/// `lower·x[n−2] + diag·x[n−1]`, every other row
/// `lower·x[i−1] + diag·x[i] + upper·x[i+1]`.
#[derive(Debug, Clone)]
pub struct ConstTridiagonal {
    lower: Real,
    diag: Real,
    upper: Real,
    /// `cc[i] = upper / pivot[i]`, `i = 0..n−2`.
    c_prime: Vec<Real>,
    /// `pivot[0] = diag`, `pivot[i] = diag − lower·cc[i−1]`.
    pivots: Vec<Real>,
}

impl ConstTridiagonal {
    /// Build the system and run the coefficient sweep.
    ///
    /// Fails with [`Error::EmptySystem`] for `size == 0` and with
    /// [`Error::SingularPivot`] if any pivot vanishes.
    pub fn new(lower: Real, diag: Real, upper: Real, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::EmptySystem);
        }
        let scale = lower.abs().max(diag.abs()).max(upper.abs());

        let mut c_prime = Vec::with_capacity(size - 1);
        let mut pivots = Vec::with_capacity(size);
        pivots.push(checked_pivot(0, diag, scale)?);
        for i in 1..size {
            let cc = upper / pivots[i - 1];
            c_prime.push(cc);
            pivots.push(checked_pivot(i, diag - lower * cc, scale)?);
        }

        Ok(Self {
            lower,
            diag,
            upper,
            c_prime,
            pivots,
        })
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.pivots.len()
    }

    /// `(lower, diag, upper)`.
    pub fn bands(&self) -> (Real, Real, Real) {
        (self.lower, self.diag, self.upper)
    }

    /// Solve `A · x = target`.
    pub fn solve(&self, target: &[Real]) -> Result<Vec<Real>> {
        let mut x = vec![0.0; self.size()];
        self.solve_into(target, &mut x)?;
        Ok(x)
    }

    /// Solve `A · x = target`, writing `x` into `out`.
    pub fn solve_into(&self, target: &[Real], out: &mut [Real]) -> Result<()> {
        let n = self.size();
        if target.is_empty() {
            return Err(Error::EmptySystem);
        }
        check_len(n, target.len())?;
        check_len(n, out.len())?;

        // Forward sweep on the target
        out[0] = target[0] / self.pivots[0];
        for i in 1..n {
            out[i] = (target[i] - self.lower * out[i - 1]) / self.pivots[i];
        }

        // Back substitution
        for i in (0..n - 1).rev() {
            out[i] -= self.c_prime[i] * out[i + 1];
        }
        Ok(())
    }

    /// Apply the operator: `y = A · x`.
    pub fn apply(&self, x: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        check_len(n, x.len())?;
        Ok((0..n)
            .map(|i| {
                let mut y = self.diag * x[i];
                if i > 0 {
                    y += self.lower * x[i - 1];
                }
                if i + 1 < n {
                    y += self.upper * x[i + 1];
                }
                y
            })
            .collect())
    }

    /// Dense `n × n` copy of the operator.
    pub fn to_dense(&self) -> Matrix {
        let n = self.size();
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = self.diag;
            if i > 0 {
                m[(i, i - 1)] = self.lower;
            }
            if i + 1 < n {
                m[(i, i + 1)] = self.upper;
            }
        }
        m
    }
}

/// Solve `A · x = target` for constant bands in one shot.
///
/// Equivalent to `ConstTridiagonal::new(lower, diag, upper, target.len())?.solve(target)`.
pub fn trisolve(lower: Real, diag: Real, upper: Real, target: &[Real]) -> Result<Vec<Real>> {
    ConstTridiagonal::new(lower, diag, upper, target.len())?.solve(target)
}

// ─── General tridiagonal operator ────────────────────────────────────────────

/// A tridiagonal matrix operator with per-row bands.
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    /// Lower diagonal (index 0 unused, starts from row 1).
    pub lower: Vec<Real>,
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Upper diagonal (last index unused, ends at row n−2).
    pub upper: Vec<Real>,
}

impl TridiagonalOperator {
    /// Create a zero tridiagonal operator of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Create from explicit bands, all of length `n`.
    pub fn from_bands(lower: Vec<Real>, diag: Vec<Real>, upper: Vec<Real>) -> Result<Self> {
        check_len(diag.len(), lower.len())?;
        check_len(diag.len(), upper.len())?;
        Ok(Self { lower, diag, upper })
    }

    /// Operator whose every row carries the same triple.
    pub fn from_constant(n: usize, lower: Real, diag: Real, upper: Real) -> Self {
        Self {
            lower: vec![lower; n],
            diag: vec![diag; n],
            upper: vec![upper; n],
        }
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Apply the operator: `y = A · x`.
    pub fn apply(&self, x: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        check_len(n, x.len())?;
        Ok((0..n)
            .map(|i| {
                let mut y = self.diag[i] * x[i];
                if i > 0 {
                    y += self.lower[i] * x[i - 1];
                }
                if i + 1 < n {
                    y += self.upper[i] * x[i + 1];
                }
                y
            })
            .collect())
    }

    /// Solve `A · x = rhs` using the Thomas algorithm.
    pub fn solve(&self, rhs: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        if n == 0 || rhs.is_empty() {
            return Err(Error::EmptySystem);
        }
        check_len(n, rhs.len())?;

        // Forward sweep
        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        let scale0 = self.diag[0].abs().max(self.upper[0].abs());
        let m0 = checked_pivot(0, self.diag[0], scale0)?;
        c_prime[0] = self.upper[0] / m0;
        d_prime[0] = rhs[0] / m0;

        for i in 1..n {
            let scale = self.lower[i]
                .abs()
                .max(self.diag[i].abs())
                .max(self.upper[i].abs());
            let m = checked_pivot(i, self.diag[i] - self.lower[i] * c_prime[i - 1], scale)?;
            if i < n - 1 {
                c_prime[i] = self.upper[i] / m;
            }
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / m;
        }

        // Back substitution
        let mut x = vec![0.0; n];
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }

        Ok(x)
    }
}
