//! QR decomposition by Householder reflections.
//!
//! For an m x n matrix with m >= n, produces an orthogonal m x n factor
//! `Q` and an upper-triangular n x n factor `R` with `A = Q * R`. The
//! Householder vectors are stored on and below the diagonal of the
//! packed matrix with the diagonal of `R` held separately, so `Q` is
//! only formed on request and [`QrDecomposition::solve`] applies the
//! reflectors directly.
//!
//! Rank deficiency does not fail construction; it is probed with
//! [`QrDecomposition::is_full_rank`] and reported by `solve`.

use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::LinalgError;

/// QR decomposition of a tall real matrix.
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    qr: Matrix<T>,
    rdiag: Vec<T>,
}

impl<T: FloatScalar> QrDecomposition<T> {
    /// Decompose `a`, working on a copy. `DimensionMismatch` when the
    /// matrix has fewer rows than columns.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        if m < n {
            return Err(LinalgError::DimensionMismatch);
        }
        let mut qr = a.clone();
        let mut rdiag = vec![T::zero(); n];

        for k in 0..n {
            // Column 2-norm below the diagonal, overflow-safe.
            let mut nrm = T::zero();
            for i in k..m {
                nrm = nrm.hypot(qr[(i, k)]);
            }

            if nrm != T::zero() {
                // Pick the reflection that adds on the diagonal rather
                // than cancelling.
                if qr[(k, k)] < T::zero() {
                    nrm = -nrm;
                }
                for i in k..m {
                    let t = qr[(i, k)] / nrm;
                    qr[(i, k)] = t;
                }
                qr[(k, k)] = qr[(k, k)] + T::one();

                // Apply the reflector to the remaining columns.
                for j in (k + 1)..n {
                    let mut s = T::zero();
                    for i in k..m {
                        s = s + qr[(i, k)] * qr[(i, j)];
                    }
                    s = -s / qr[(k, k)];
                    for i in k..m {
                        let t = s * qr[(i, k)];
                        qr[(i, j)] = qr[(i, j)] + t;
                    }
                }
            }
            rdiag[k] = -nrm;
        }

        Ok(Self { qr, rdiag })
    }

    /// True when every diagonal entry of `R` is nonzero.
    pub fn is_full_rank(&self) -> bool {
        self.rdiag.iter().all(|&d| d != T::zero())
    }

    /// The packed Householder vectors (m x n lower trapezoid).
    pub fn h(&self) -> Matrix<T> {
        Matrix::from_fn(self.qr.nrows(), self.qr.ncols(), |i, j| {
            if i >= j {
                self.qr[(i, j)]
            } else {
                T::zero()
            }
        })
    }

    /// The upper-triangular factor `R` (n x n).
    pub fn r(&self) -> Matrix<T> {
        let n = self.qr.ncols();
        Matrix::from_fn(n, n, |i, j| {
            if i < j {
                self.qr[(i, j)]
            } else if i == j {
                self.rdiag[i]
            } else {
                T::zero()
            }
        })
    }

    /// The orthogonal factor `Q` (economy size, m x n), formed by
    /// back-applying the reflectors from the last column to the first.
    pub fn q(&self) -> Matrix<T> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();
        let mut q = Matrix::zeros(m, n);
        for k in (0..n).rev() {
            q[(k, k)] = T::one();
            for j in k..n {
                if self.qr[(k, k)] != T::zero() {
                    let mut s = T::zero();
                    for i in k..m {
                        s = s + self.qr[(i, k)] * q[(i, j)];
                    }
                    s = -s / self.qr[(k, k)];
                    for i in k..m {
                        let t = s * self.qr[(i, k)];
                        q[(i, j)] = q[(i, j)] + t;
                    }
                }
            }
        }
        q
    }

    /// Least-squares solve of `A * X = B`, returning the n x nx `X`
    /// minimising each column residual.
    ///
    /// `DimensionMismatch` when `b.nrows() != m`, `RankDeficient` when
    /// any diagonal of `R` is zero.
    pub fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();
        if b.nrows() != m {
            return Err(LinalgError::DimensionMismatch);
        }
        if !self.is_full_rank() {
            return Err(LinalgError::RankDeficient);
        }
        let nx = b.ncols();
        // Degenerate shapes: no unknowns or no right-hand sides.
        if n == 0 {
            return Ok(Matrix::zeros(0, nx));
        }
        if nx == 0 {
            return Ok(Matrix::zeros(n, 0));
        }
        let mut x = b.clone();

        // Y = Q^T * B, applied reflector by reflector.
        for k in 0..n {
            for j in 0..nx {
                let mut s = T::zero();
                for i in k..m {
                    s = s + self.qr[(i, k)] * x[(i, j)];
                }
                s = -s / self.qr[(k, k)];
                for i in k..m {
                    let t = s * self.qr[(i, k)];
                    x[(i, j)] = x[(i, j)] + t;
                }
            }
        }

        // Back substitution against R.
        for k in (0..n).rev() {
            for j in 0..nx {
                x[(k, j)] = x[(k, j)] / self.rdiag[k];
            }
            for i in 0..k {
                for j in 0..nx {
                    let t = x[(k, j)] * self.qr[(i, k)];
                    x[(i, j)] = x[(i, j)] - t;
                }
            }
        }

        x.submatrix(0, n - 1, 0, nx - 1)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Householder QR decomposition. `DimensionMismatch` when the
    /// matrix is wider than tall.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let qr = a.qr().unwrap();
    /// assert!(qr.is_full_rank());
    /// let rebuilt = qr.q().matmul(&qr.r()).unwrap();
    /// assert!((rebuilt[(2, 1)] - 6.0).abs() < 1e-12);
    /// ```
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        QrDecomposition::new(self)
    }
}
