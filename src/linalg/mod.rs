//! Matrix decompositions and linear solvers.
//!
//! Decomposition constructors work on a copy of the input and, apart
//! from shape checks, never fail: rank or singularity problems surface
//! when a factor is used (`solve`, `det`), not when it is computed.
//! Probe methods (`is_nonsingular`, `is_full_rank`) allow checking
//! before solving.

pub(crate) mod eigen;
pub(crate) mod hessenberg;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod schur;
pub(crate) mod symmetric_eigen;

pub use eigen::EigenDecomposition;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;

use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Errors from matrix operations and decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible.
    DimensionMismatch,
    /// A row or column index is out of range.
    IndexOutOfRange,
    /// The operation requires a square matrix.
    SquareRequired,
    /// The matrix is singular (a zero pivot in LU).
    Singular,
    /// The matrix is rank deficient (a zero diagonal in R).
    RankDeficient,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch => write!(f, "matrix dimension mismatch"),
            LinalgError::IndexOutOfRange => write!(f, "index out of range"),
            LinalgError::SquareRequired => write!(f, "matrix must be square"),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::RankDeficient => write!(f, "matrix is rank deficient"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

// ── Solver entry points ─────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Solve `A * X = B`.
    ///
    /// Uses LU with partial pivoting when `A` is square and Householder
    /// QR least squares when `A` is tall. Underdetermined systems
    /// (`m < n`) are not supported and return `DimensionMismatch`.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 4.0]);
    /// let b = Matrix::from_rows(2, 1, &[2.0, 8.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Self) -> Result<Self, LinalgError> {
        if self.nrows() == self.ncols() {
            self.lu().solve(b)
        } else if self.nrows() > self.ncols() {
            self.qr()?.solve(b)
        } else {
            Err(LinalgError::DimensionMismatch)
        }
    }

    /// Matrix inverse via LU.
    ///
    /// Errors with `SquareRequired` for rectangular input and
    /// `Singular` when no inverse exists.
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::SquareRequired);
        }
        self.lu().solve(&Self::identity(self.nrows()))
    }

    /// Determinant via LU. `SquareRequired` for rectangular input.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((a.det().unwrap() + 2.0).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> Result<T, LinalgError> {
        self.lu().det()
    }

    /// Real parts of the eigenvalues, in the order the decomposition
    /// produces them (ascending for symmetric input).
    pub fn eigenvalues(&self) -> Result<Vec<T>, LinalgError> {
        Ok(self.eig()?.real_eigenvalues().to_vec())
    }
}
