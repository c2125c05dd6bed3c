//! Matrix norms and the trace.

use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of the diagonal elements. Valid for any shape; runs over the
    /// leading `min(m, n)` diagonal.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(a.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let mut t = T::zero();
        for i in 0..self.nrows.min(self.ncols) {
            t = t + self[(i, i)];
        }
        t
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// One norm: maximum absolute column sum.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert_eq!(a.norm1(), 6.0);
    /// ```
    pub fn norm1(&self) -> T {
        let mut max = T::zero();
        for j in 0..self.ncols {
            let mut col_sum = T::zero();
            for i in 0..self.nrows {
                col_sum = col_sum + self[(i, j)].abs();
            }
            if col_sum > max {
                max = col_sum;
            }
        }
        max
    }

    /// Infinity norm: maximum absolute row sum.
    ///
    /// ```
    /// use realmat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert_eq!(a.norm_inf(), 7.0);
    /// ```
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for i in 0..self.nrows {
            let mut row_sum = T::zero();
            for &x in self.row_slice(i) {
                row_sum = row_sum + x.abs();
            }
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// Frobenius norm, accumulated with `hypot` so large entries do not
    /// overflow when squared.
    pub fn norm_fro(&self) -> T {
        let mut f = T::zero();
        for &x in &self.data {
            f = f.hypot(x);
        }
        f
    }
}
