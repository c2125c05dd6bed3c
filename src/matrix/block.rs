//! Submatrix extraction.
//!
//! Ranges are inclusive on both ends, so `submatrix(0, 1, 0, 1)` is the
//! leading 2x2 block. Every extractor returns a new owned matrix and
//! reports any out-of-range index as `IndexOutOfRange`.

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Copy the block with rows `r0..=r1` and columns `c0..=c1`.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let b = a.submatrix(1, 2, 0, 1).unwrap();
    /// assert_eq!(b.nrows(), 2);
    /// assert_eq!(b[(0, 0)], 4);
    /// assert_eq!(b[(1, 1)], 8);
    /// ```
    pub fn submatrix(
        &self,
        r0: usize,
        r1: usize,
        c0: usize,
        c1: usize,
    ) -> Result<Self, LinalgError> {
        if r0 > r1 || c0 > c1 || r1 >= self.nrows || c1 >= self.ncols {
            return Err(LinalgError::IndexOutOfRange);
        }
        let mut out = Self::zeros(r1 - r0 + 1, c1 - c0 + 1);
        for i in r0..=r1 {
            for j in c0..=c1 {
                out[(i - r0, j - c0)] = self[(i, j)];
            }
        }
        Ok(out)
    }

    /// Copy the rows and columns named by the index lists, in order.
    /// Repeated indices are allowed.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let b = a.select(&[2, 0], &[1]).unwrap();
    /// assert_eq!(b[(0, 0)], 8);
    /// assert_eq!(b[(1, 0)], 2);
    /// ```
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Result<Self, LinalgError> {
        if rows.iter().any(|&r| r >= self.nrows) || cols.iter().any(|&c| c >= self.ncols) {
            return Err(LinalgError::IndexOutOfRange);
        }
        let mut out = Self::zeros(rows.len(), cols.len());
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in cols.iter().enumerate() {
                out[(i, j)] = self[(r, c)];
            }
        }
        Ok(out)
    }

    /// Copy the named rows restricted to columns `c0..=c1`.
    pub fn select_rows(&self, rows: &[usize], c0: usize, c1: usize) -> Result<Self, LinalgError> {
        if c0 > c1 || c1 >= self.ncols || rows.iter().any(|&r| r >= self.nrows) {
            return Err(LinalgError::IndexOutOfRange);
        }
        let mut out = Self::zeros(rows.len(), c1 - c0 + 1);
        for (i, &r) in rows.iter().enumerate() {
            for j in c0..=c1 {
                out[(i, j - c0)] = self[(r, j)];
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(m: usize, n: usize) -> Matrix<i64> {
        Matrix::from_fn(m, n, |i, j| (i * n + j) as i64)
    }

    #[test]
    fn submatrix_block() {
        let a = counting(4, 4);
        let b = a.submatrix(1, 2, 2, 3).unwrap();
        assert_eq!(b.nrows(), 2);
        assert_eq!(b.ncols(), 2);
        assert_eq!(b[(0, 0)], 6);
        assert_eq!(b[(1, 1)], 11);
    }

    #[test]
    fn submatrix_single_element() {
        let a = counting(3, 3);
        let b = a.submatrix(2, 2, 2, 2).unwrap();
        assert_eq!(b.nrows(), 1);
        assert_eq!(b[(0, 0)], 8);
    }

    #[test]
    fn submatrix_out_of_range() {
        let a = counting(3, 3);
        assert_eq!(a.submatrix(0, 3, 0, 2), Err(LinalgError::IndexOutOfRange));
        assert_eq!(a.submatrix(2, 1, 0, 2), Err(LinalgError::IndexOutOfRange));
    }

    #[test]
    fn select_permutes_and_repeats() {
        let a = counting(3, 3);
        let b = a.select(&[1, 1, 0], &[2, 0]).unwrap();
        assert_eq!(b.nrows(), 3);
        assert_eq!(b.ncols(), 2);
        assert_eq!(b[(0, 0)], 5);
        assert_eq!(b[(1, 0)], 5);
        assert_eq!(b[(2, 1)], 0);
    }

    #[test]
    fn select_bad_index() {
        let a = counting(2, 2);
        assert_eq!(a.select(&[0, 2], &[0]), Err(LinalgError::IndexOutOfRange));
        assert_eq!(a.select(&[0], &[5]), Err(LinalgError::IndexOutOfRange));
    }

    #[test]
    fn select_rows_window() {
        let a = counting(3, 4);
        let b = a.select_rows(&[2, 0], 1, 3).unwrap();
        assert_eq!(b.nrows(), 2);
        assert_eq!(b.ncols(), 3);
        assert_eq!(b[(0, 0)], 9);
        assert_eq!(b[(1, 2)], 3);
    }
}
