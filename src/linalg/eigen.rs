//! Eigenvalue decomposition of a square real matrix.
//!
//! Symmetric input (checked by exact element comparison against the
//! transpose) goes through tridiagonalization and the QL iteration and
//! yields real eigenvalues in ascending order with orthonormal
//! eigenvectors. Anything else goes through the Hessenberg reduction
//! and the double-shift QR iteration and may yield conjugate complex
//! pairs; the pair's eigenvectors are stored as consecutive
//! (real, imaginary) columns of `v`.

use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::hessenberg::orthes;
use super::schur::hqr2;
use super::symmetric_eigen::{tql2, tred2};
use super::LinalgError;

/// Eigenvalue decomposition `A * V = V * D` of a square real matrix.
#[derive(Debug, Clone)]
pub struct EigenDecomposition<T> {
    n: usize,
    symmetric: bool,
    d: Vec<T>,
    e: Vec<T>,
    v: Matrix<T>,
}

impl<T: FloatScalar> EigenDecomposition<T> {
    /// Decompose `a`, working on a copy. `SquareRequired` for
    /// rectangular input; never fails otherwise.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::SquareRequired);
        }
        let n = a.nrows();
        if n == 0 {
            return Ok(Self {
                n,
                symmetric: true,
                d: Vec::new(),
                e: Vec::new(),
                v: Matrix::zeros(0, 0),
            });
        }

        let mut symmetric = true;
        'scan: for i in 0..n {
            for j in 0..n {
                if a[(i, j)] != a[(j, i)] {
                    symmetric = false;
                    break 'scan;
                }
            }
        }

        let mut d = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];
        let v = if symmetric {
            let mut v = a.clone();
            tred2(&mut v, &mut d, &mut e);
            tql2(&mut d, &mut e, &mut v);
            v
        } else {
            let mut h = a.clone();
            let mut v = Matrix::zeros(n, n);
            let mut ort = vec![T::zero(); n];
            orthes(&mut h, &mut ort, &mut v);
            hqr2(&mut h, &mut v, &mut d, &mut e);
            v
        };

        Ok(Self {
            n,
            symmetric,
            d,
            e,
            v,
        })
    }

    /// True when the input compared exactly equal to its transpose.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// The eigenvector matrix `V`.
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Real parts of the eigenvalues.
    pub fn real_eigenvalues(&self) -> &[T] {
        &self.d
    }

    /// Imaginary parts of the eigenvalues; zero for real ones, `+u`
    /// then `-u` for a conjugate pair.
    pub fn imag_eigenvalues(&self) -> &[T] {
        &self.e
    }

    /// The block-diagonal eigenvalue matrix `D`: real eigenvalues on
    /// the diagonal, conjugate pairs as 2x2 blocks
    /// `[[re, im], [-im, re]]`.
    pub fn d(&self) -> Matrix<T> {
        let mut dm = Matrix::zeros(self.n, self.n);
        for i in 0..self.n {
            dm[(i, i)] = self.d[i];
            if self.e[i] > T::zero() {
                dm[(i, i + 1)] = self.e[i];
            } else if self.e[i] < T::zero() {
                dm[(i, i - 1)] = self.e[i];
            }
        }
        dm
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Eigenvalue decomposition. `SquareRequired` for rectangular
    /// input.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
    /// let eig = a.eig().unwrap();
    /// assert!(eig.is_symmetric());
    /// let d = eig.real_eigenvalues();
    /// assert!((d[0] - 1.0).abs() < 1e-12);
    /// assert!((d[1] - 3.0).abs() < 1e-12);
    /// ```
    pub fn eig(&self) -> Result<EigenDecomposition<T>, LinalgError> {
        EigenDecomposition::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, msg: &str) {
        assert!((a - b).abs() < TOL, "{}: {} vs {}", msg, a, b);
    }

    fn assert_matrix_near(a: &Matrix<f64>, b: &Matrix<f64>, msg: &str) {
        assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()), "{}", msg);
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(a[(i, j)], b[(i, j)], msg);
            }
        }
    }

    #[test]
    fn rectangular_rejected() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(a.eig(), Err(LinalgError::SquareRequired)));
    }

    #[test]
    fn identity_eigenvalues_exact() {
        let eig = Matrix::<f64>::identity(4).eig().unwrap();
        assert!(eig.is_symmetric());
        for &lambda in eig.real_eigenvalues() {
            assert_eq!(lambda, 1.0);
        }
        for &mu in eig.imag_eigenvalues() {
            assert_eq!(mu, 0.0);
        }
        assert_eq!(*eig.v(), Matrix::identity(4));
    }

    #[test]
    fn symmetric_reconstruction() {
        let a = Matrix::from_rows(3, 3, &[
            4.0, 1.0, -2.0, //
            1.0, 2.0, 0.0, //
            -2.0, 0.0, 3.0,
        ]);
        let eig = a.eig().unwrap();
        assert!(eig.is_symmetric());
        let v = eig.v();
        let rebuilt = v.matmul(&eig.d()).unwrap().matmul(&v.transpose()).unwrap();
        assert_matrix_near(&rebuilt, &a, "V*D*V^T = A");
    }

    #[test]
    fn rotation_matrix_complex_pair() {
        let a = Matrix::from_rows(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        let eig = a.eig().unwrap();
        assert!(!eig.is_symmetric());
        let d = eig.real_eigenvalues();
        let e = eig.imag_eigenvalues();
        assert_near(d[0], 0.0, "re");
        assert_near(d[1], 0.0, "re");
        assert_near(e[0], 1.0, "im");
        assert_near(e[1], -1.0, "im");

        // D carries the pair as a 2x2 block.
        let dm = eig.d();
        assert_near(dm[(0, 1)], 1.0, "block upper");
        assert_near(dm[(1, 0)], -1.0, "block lower");
    }

    #[test]
    fn general_real_spectrum_av_equals_vd() {
        let a = Matrix::from_rows(3, 3, &[
            1.0, 2.0, 0.0, //
            0.5, 1.0, 3.0, //
            0.0, 0.25, 1.0,
        ]);
        let eig = a.eig().unwrap();
        let av = a.matmul(eig.v()).unwrap();
        let vd = eig.v().matmul(&eig.d()).unwrap();
        assert_matrix_near(&av, &vd, "A*V = V*D");
    }

    #[test]
    fn complex_pair_av_equals_vd() {
        // One real eigenvalue and one conjugate pair.
        let a = Matrix::from_rows(3, 3, &[
            0.0, -1.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 2.0,
        ]);
        let eig = a.eig().unwrap();
        let av = a.matmul(eig.v()).unwrap();
        let vd = eig.v().matmul(&eig.d()).unwrap();
        assert_matrix_near(&av, &vd, "A*V = V*D with 2x2 block");
    }

    #[test]
    fn nearly_symmetric_takes_general_path() {
        // One off-diagonal differs in the last bit; symmetry is decided
        // by exact comparison, so this routes to the general iteration.
        let mut a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        a[(0, 1)] = 1.0 + f64::EPSILON;
        let eig = a.eig().unwrap();
        assert!(!eig.is_symmetric());
        // Spectrum is still essentially {1, 3}.
        let mut d = eig.real_eigenvalues().to_vec();
        d.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_near(d[0], 1.0, "lambda_0");
        assert_near(d[1], 3.0, "lambda_1");
    }

    #[test]
    fn eigenvalues_convenience() {
        let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let d = a.eigenvalues().unwrap();
        assert_near(d[0], 1.0, "lambda_0");
        assert_near(d[1], 3.0, "lambda_1");
    }
}
