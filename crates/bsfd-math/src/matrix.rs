//! `Matrix`: a two-dimensional matrix of reals.
//!
//! A thin newtype around `nalgebra::DMatrix<f64>` exposing `(row, col)`
//! indexing and the handful of row accessors the finite-difference
//! solution grids need.

use bsfd_core::Real;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// A dynamically-sized 2D matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Copy row `i` out as a vector.
    pub fn row(&self, i: usize) -> Vec<Real> {
        self.0.row(i).iter().copied().collect()
    }

    /// Overwrite row `i` with `values` (must have `cols()` entries).
    pub fn set_row(&mut self, i: usize, values: &[Real]) {
        assert_eq!(values.len(), self.cols(), "row length mismatch");
        for (j, &v) in values.iter().enumerate() {
            self.0[(i, j)] = v;
        }
    }

    /// Matrix-vector product `M * v`.
    pub fn mul_vec(&self, v: &[Real]) -> Vec<Real> {
        assert_eq!(v.len(), self.cols(), "vector length mismatch");
        (0..self.rows())
            .map(|i| self.0.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect()
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert_eq!(m.row(2), vec![0.0; 4]);
    }

    #[test]
    fn set_row_and_index() {
        let mut m = Matrix::zeros(2, 3);
        m.set_row(1, &[4.0, 5.0, 6.0]);
        m[(0, 2)] = 3.0;
        assert_eq!(m.row(1), vec![4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn matrix_vector_mul() {
        let mut m = Matrix::zeros(2, 3);
        m.set_row(0, &[1.0, 2.0, 3.0]);
        m.set_row(1, &[4.0, 5.0, 6.0]);
        assert_eq!(m.mul_vec(&[1.0, 1.0, 1.0]), vec![6.0, 15.0]);
    }
}
