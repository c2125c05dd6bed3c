//! Dense row-major matrix with runtime dimensions.
//!
//! [`Matrix<T>`] stores an `nrows x ncols` grid in a single flat `Vec`
//! indexed by `i * ncols + j`. Dimensions are fixed at construction;
//! every derived matrix (transpose, submatrix, operator results,
//! decomposition factors) is a new owned value.

mod block;
mod norm;
mod ops;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};
use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

/// Dense matrix with element type `T` and runtime dimensions.
///
/// ```
/// use realmat::Matrix;
/// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.transpose()[(0, 1)], 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) data: Vec<T>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// An `m x n` matrix of zeros.
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            data: vec![T::zero(); m * n],
            nrows: m,
            ncols: n,
        }
    }

    /// An `m x n` matrix of ones.
    pub fn ones(m: usize, n: usize) -> Self {
        Self::filled(m, n, T::one())
    }

    /// An `m x n` matrix with every element equal to `v`.
    pub fn filled(m: usize, n: usize, v: T) -> Self {
        Self {
            data: vec![v; m * n],
            nrows: m,
            ncols: n,
        }
    }

    /// The `n x n` identity matrix.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let i = Matrix::<f64>::identity(3);
    /// assert_eq!(i[(1, 1)], 1.0);
    /// assert_eq!(i[(1, 2)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Build from a row-major slice of `m * n` elements.
    ///
    /// Panics if the slice length does not match.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(a[(1, 0)], 4);
    /// ```
    pub fn from_rows(m: usize, n: usize, elements: &[T]) -> Self {
        assert_eq!(elements.len(), m * n, "element count mismatch");
        Self {
            data: elements.to_vec(),
            nrows: m,
            ncols: n,
        }
    }

    /// Take ownership of a row-major `Vec` of `m * n` elements.
    ///
    /// Panics if the vector length does not match.
    pub fn from_vec(m: usize, n: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), m * n, "element count mismatch");
        Self {
            data,
            nrows: m,
            ncols: n,
        }
    }

    /// Build element-wise from `f(i, j)`.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let hilbert = Matrix::from_fn(3, 3, |i, j| 1.0 / (i + j + 1) as f64);
    /// assert_eq!(hilbert[(0, 0)], 1.0);
    /// assert_eq!(hilbert[(2, 2)], 0.2);
    /// ```
    pub fn from_fn(m: usize, n: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            nrows: m,
            ncols: n,
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// True if the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// The underlying row-major element slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Slice view of row `i`.
    #[inline]
    pub(crate) fn row_slice(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// Bounds-checked element read.
    ///
    /// ```
    /// use realmat::{LinalgError, Matrix};
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(a.get(1, 0), Ok(3.0));
    /// assert_eq!(a.get(2, 0), Err(LinalgError::IndexOutOfRange));
    /// ```
    pub fn get(&self, i: usize, j: usize) -> Result<T, LinalgError> {
        if i >= self.nrows || j >= self.ncols {
            return Err(LinalgError::IndexOutOfRange);
        }
        Ok(self.data[i * self.ncols + j])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, i: usize, j: usize, v: T) -> Result<(), LinalgError> {
        if i >= self.nrows || j >= self.ncols {
            return Err(LinalgError::IndexOutOfRange);
        }
        self.data[i * self.ncols + j] = v;
        Ok(())
    }

    /// Transpose, returning a new `n x m` matrix.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.ncols, self.nrows);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }
}

// ── Indexing ────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.nrows && j < self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.nrows,
            self.ncols,
        );
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.nrows && j < self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.nrows,
            self.ncols,
        );
        &mut self.data[i * self.ncols + j]
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths: Vec<usize> = vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i < m - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.len();
        Ok(())
    }
}
