//! Arithmetic for [`Matrix`].
//!
//! Operators (`+`, `-`, `*`, unary `-`) assert that shapes agree and
//! panic with a formatted message on misuse; the checked counterparts
//! ([`Matrix::try_add`], [`Matrix::try_sub`], [`Matrix::matmul`]) return
//! `Err(LinalgError::DimensionMismatch)` instead.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::Matrix;

// ── Checked arithmetic ──────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Element-wise sum, or `DimensionMismatch` if shapes differ.
    ///
    /// ```
    /// use realmat::{LinalgError, Matrix};
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = Matrix::from_rows(2, 2, &[4.0, 3.0, 2.0, 1.0]);
    /// assert_eq!(a.try_add(&b).unwrap()[(0, 0)], 5.0);
    ///
    /// let c = Matrix::<f64>::zeros(3, 2);
    /// assert_eq!(a.try_add(&c), Err(LinalgError::DimensionMismatch));
    /// ```
    pub fn try_add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if (self.nrows, self.ncols) != (rhs.nrows, rhs.ncols) {
            return Err(LinalgError::DimensionMismatch);
        }
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference, or `DimensionMismatch` if shapes differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if (self.nrows, self.ncols) != (rhs.nrows, rhs.ncols) {
            return Err(LinalgError::DimensionMismatch);
        }
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Matrix product, or `DimensionMismatch` unless `self.ncols == rhs.nrows`.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let b = Matrix::from_rows(3, 1, &[1.0, 1.0, 1.0]);
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 6.0);
    /// assert_eq!(c[(1, 0)], 15.0);
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch);
        }
        Ok(self.mul_unchecked(rhs))
    }

    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> Self {
        Self {
            data: self.data.iter().map(|&x| x * s).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn mul_unchecked(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            let row = self.row_slice(i);
            for j in 0..rhs.ncols {
                let mut s = T::zero();
                for (k, &a_ik) in row.iter().enumerate() {
                    s = s + a_ik * rhs[(k, j)];
                }
                out[(i, j)] = s;
            }
        }
        out
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        Self {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn assert_same_shape(&self, rhs: &Self, op: &str) {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch in matrix {}",
            op,
        );
    }
}

// ── Addition / subtraction ──────────────────────────────────────────

impl<T: Scalar> Add for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Self) -> Matrix<T> {
        self.assert_same_shape(rhs, "addition");
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Add for Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Self) -> Matrix<T> {
        &self + &rhs
    }
}

impl<T: Scalar> Sub for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Self) -> Matrix<T> {
        self.assert_same_shape(rhs, "subtraction");
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: Scalar> Sub for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Self) -> Matrix<T> {
        &self - &rhs
    }
}

impl<T: Scalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        self.assert_same_shape(rhs, "addition");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        self.assert_same_shape(rhs, "subtraction");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

// ── Multiplication ──────────────────────────────────────────────────

impl<T: Scalar> Mul for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Matrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch in matrix multiplication",
        );
        self.mul_unchecked(rhs)
    }
}

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Matrix<T> {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        Matrix {
            data: self.data.iter().map(|&x| -x).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}
