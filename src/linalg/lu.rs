//! LU decomposition with partial pivoting.
//!
//! Left-looking elimination in the Crout/Doolittle style: for an m x n
//! matrix `A` with m >= n, produces a unit lower-triangular `L`, an
//! upper-triangular `U`, and a row permutation `piv` such that
//! `A(piv, :) = L * U`. Both factors are packed into a single matrix,
//! multipliers strictly below the diagonal and `U` on and above it.
//!
//! Construction always succeeds, singular input included; singularity
//! is reported by [`LuDecomposition::solve`] or probed up front with
//! [`LuDecomposition::is_nonsingular`].

use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::LinalgError;

/// LU decomposition of a real matrix, with the packed factor matrix,
/// pivot vector, and pivot sign.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: Matrix<T>,
    piv: Vec<usize>,
    pivsign: i32,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Decompose `a`, working on a copy. Never fails; see
    /// [`LuDecomposition::is_nonsingular`] before solving.
    pub fn new(a: &Matrix<T>) -> Self {
        let mut lu = a.clone();
        let m = lu.nrows();
        let n = lu.ncols();
        let mut piv: Vec<usize> = (0..m).collect();
        let mut pivsign = 1;

        // Scratch copy of the current column, updated in place.
        let mut lu_col = vec![T::zero(); m];

        for j in 0..n {
            for (i, c) in lu_col.iter_mut().enumerate() {
                *c = lu[(i, j)];
            }

            // Dot-product update against the already-computed factors.
            for i in 0..m {
                let kmax = i.min(j);
                let mut s = T::zero();
                for k in 0..kmax {
                    s = s + lu[(i, k)] * lu_col[k];
                }
                lu_col[i] = lu_col[i] - s;
                lu[(i, j)] = lu_col[i];
            }

            // Pivot on the largest remaining magnitude; ties keep the
            // topmost row.
            let mut p = j;
            for i in (j + 1)..m {
                if lu_col[i].abs() > lu_col[p].abs() {
                    p = i;
                }
            }
            if p != j {
                lu.swap_rows(p, j);
                piv.swap(p, j);
                pivsign = -pivsign;
            }

            // Scale the multipliers. A zero pivot leaves the column
            // untouched and is caught later by is_nonsingular.
            if j < m && lu[(j, j)] != T::zero() {
                let pivot = lu[(j, j)];
                for i in (j + 1)..m {
                    let q = lu[(i, j)] / pivot;
                    lu[(i, j)] = q;
                }
            }
        }

        Self { lu, piv, pivsign }
    }

    /// True when every pivot (diagonal of `U`) is nonzero.
    pub fn is_nonsingular(&self) -> bool {
        for j in 0..self.lu.ncols().min(self.lu.nrows()) {
            if self.lu[(j, j)] == T::zero() {
                return false;
            }
        }
        true
    }

    /// The unit lower-triangular factor `L` (m x n).
    pub fn l(&self) -> Matrix<T> {
        Matrix::from_fn(self.lu.nrows(), self.lu.ncols(), |i, j| {
            if i > j {
                self.lu[(i, j)]
            } else if i == j {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    /// The upper-triangular factor `U` (n x n).
    pub fn u(&self) -> Matrix<T> {
        let n = self.lu.ncols();
        Matrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// The row permutation: source row of each output row.
    pub fn piv(&self) -> &[usize] {
        &self.piv
    }

    /// Determinant: pivot sign times the product of the pivots.
    /// `SquareRequired` for rectangular input.
    pub fn det(&self) -> Result<T, LinalgError> {
        if self.lu.nrows() != self.lu.ncols() {
            return Err(LinalgError::SquareRequired);
        }
        let mut d = if self.pivsign >= 0 {
            T::one()
        } else {
            -T::one()
        };
        for j in 0..self.lu.ncols() {
            d = d * self.lu[(j, j)];
        }
        Ok(d)
    }

    /// Solve `A * X = B` for each column of `b`.
    ///
    /// `DimensionMismatch` when row counts differ, `Singular` when any
    /// pivot is zero.
    pub fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        let m = self.lu.nrows();
        let n = self.lu.ncols();
        if b.nrows() != m {
            return Err(LinalgError::DimensionMismatch);
        }
        if !self.is_nonsingular() {
            return Err(LinalgError::Singular);
        }
        let nx = b.ncols();
        if nx == 0 {
            return Ok(Matrix::zeros(n, 0));
        }

        // Permute the right-hand side by the pivot vector.
        let mut x = b.select_rows(&self.piv, 0, nx - 1)?;

        // Forward substitution against unit-lower L.
        for k in 0..n {
            for i in (k + 1)..n {
                for j in 0..nx {
                    let t = x[(k, j)] * self.lu[(i, k)];
                    x[(i, j)] = x[(i, j)] - t;
                }
            }
        }

        // Back substitution against U.
        for k in (0..n).rev() {
            let pivot = self.lu[(k, k)];
            for j in 0..nx {
                x[(k, j)] = x[(k, j)] / pivot;
            }
            for i in 0..k {
                for j in 0..nx {
                    let t = x[(k, j)] * self.lu[(i, k)];
                    x[(i, j)] = x[(i, j)] - t;
                }
            }
        }

        Ok(x)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition with partial pivoting.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
    /// let lu = a.lu();
    /// assert!(lu.is_nonsingular());
    /// assert!((lu.det().unwrap() + 6.0).abs() < 1e-12);
    /// ```
    pub fn lu(&self) -> LuDecomposition<T> {
        LuDecomposition::new(self)
    }
}
