//! Householder reduction of a general square matrix to upper
//! Hessenberg form, the first stage of the nonsymmetric eigenvalue
//! iteration.

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Reduce `h` to upper Hessenberg form in place, accumulating the
/// orthogonal similarity transformations into `v`.
///
/// `ort` is caller-provided workspace of length `n`. On exit the
/// entries of `h` on and above the first sub-diagonal are the
/// Hessenberg result; the entries below it are Householder-vector
/// scratch (read back by the accumulation pass), not zeros. With `hess`
/// the packed result masked to its Hessenberg part, the original
/// matrix is `v * hess * v^T`.
pub(crate) fn orthes<T: FloatScalar>(h: &mut Matrix<T>, ort: &mut [T], v: &mut Matrix<T>) {
    let n = h.nrows();
    let low = 0;
    let high = n - 1;

    for m in (low + 1)..high {
        // Scale the column below the sub-diagonal.
        let mut scale = T::zero();
        for i in m..=high {
            scale = scale + h[(i, m - 1)].abs();
        }
        if scale != T::zero() {
            // Compute the Householder reflector.
            let mut hsum = T::zero();
            for i in (m..=high).rev() {
                ort[i] = h[(i, m - 1)] / scale;
                hsum = hsum + ort[i] * ort[i];
            }
            let mut g = hsum.sqrt();
            if ort[m] > T::zero() {
                g = -g;
            }
            hsum = hsum - ort[m] * g;
            ort[m] = ort[m] - g;

            // Apply it from both sides: H = (I - u*u'/h) * H * (I - u*u'/h).
            for j in m..n {
                let mut f = T::zero();
                for i in (m..=high).rev() {
                    f = f + ort[i] * h[(i, j)];
                }
                f = f / hsum;
                for i in m..=high {
                    h[(i, j)] = h[(i, j)] - f * ort[i];
                }
            }
            for i in 0..=high {
                let mut f = T::zero();
                for j in (m..=high).rev() {
                    f = f + ort[j] * h[(i, j)];
                }
                f = f / hsum;
                for j in m..=high {
                    h[(i, j)] = h[(i, j)] - f * ort[j];
                }
            }
            ort[m] = scale * ort[m];
            h[(m, m - 1)] = scale * g;
        }
    }

    // Accumulate the transformations, last reflector first.
    for i in 0..n {
        for j in 0..n {
            v[(i, j)] = if i == j { T::one() } else { T::zero() };
        }
    }
    for m in ((low + 1)..high).rev() {
        if h[(m, m - 1)] != T::zero() {
            for i in (m + 1)..=high {
                ort[i] = h[(i, m - 1)];
            }
            for j in m..=high {
                let mut g = T::zero();
                for i in m..=high {
                    g = g + ort[i] * v[(i, j)];
                }
                // Double division avoids possible underflow.
                g = (g / ort[m]) / h[(m, m - 1)];
                for i in m..=high {
                    v[(i, j)] = v[(i, j)] + g * ort[i];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, msg: &str) {
        assert!((a - b).abs() < TOL, "{}: {} vs {}", msg, a, b);
    }

    fn reduce(a: &Matrix<f64>) -> (Matrix<f64>, Matrix<f64>) {
        let n = a.nrows();
        let mut h = a.clone();
        let mut v = Matrix::zeros(n, n);
        let mut ort = vec![0.0; n];
        orthes(&mut h, &mut ort, &mut v);
        (h, v)
    }

    /// The packed result with the reflector scratch below the first
    /// sub-diagonal zeroed out.
    fn hessenberg_part(h: &Matrix<f64>) -> Matrix<f64> {
        Matrix::from_fn(h.nrows(), h.ncols(), |i, j| {
            if i > j + 1 {
                0.0
            } else {
                h[(i, j)]
            }
        })
    }

    #[test]
    fn transformed_input_is_hessenberg() {
        let a = Matrix::from_rows(4, 4, &[
            4.0, 1.0, -2.0, 2.0, //
            1.0, 2.0, 0.0, 1.0, //
            -2.0, 0.0, 3.0, -2.0, //
            2.0, 1.0, -2.0, -1.0,
        ]);
        let (h, v) = reduce(&a);
        // V^T * A * V has zeros below the first sub-diagonal and agrees
        // with the packed result on the Hessenberg part.
        let vt_a_v = v
            .transpose()
            .matmul(&a)
            .unwrap()
            .matmul(&v)
            .unwrap();
        let hess = hessenberg_part(&h);
        for i in 0..4 {
            for j in 0..4 {
                if i > j + 1 {
                    assert_near(vt_a_v[(i, j)], 0.0, "below sub-diagonal");
                } else {
                    assert_near(vt_a_v[(i, j)], hess[(i, j)], "V^T*A*V = H");
                }
            }
        }
    }

    #[test]
    fn similarity_preserved() {
        let a = Matrix::from_rows(4, 4, &[
            1.0, 5.0, 0.0, 2.0, //
            -3.0, 2.0, 4.0, 1.0, //
            2.0, -1.0, 3.0, 0.0, //
            0.5, 1.0, -2.0, 4.0,
        ]);
        let (h, v) = reduce(&a);
        // V * H * V^T reconstructs A, with H the masked Hessenberg
        // part; the raw packed matrix still carries reflector scratch.
        let hess = hessenberg_part(&h);
        let rebuilt = v.matmul(&hess).unwrap().matmul(&v.transpose()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_near(rebuilt[(i, j)], a[(i, j)], "V*H*V^T = A");
            }
        }
        // V is orthogonal.
        let gram = v.transpose().matmul(&v).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_near(gram[(i, j)], if i == j { 1.0 } else { 0.0 }, "V^T*V");
            }
        }
    }

    #[test]
    fn zero_subcolumn_skipped() {
        // Nothing to annihilate below the first sub-diagonal entry, so
        // the matrix passes through unchanged.
        let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 0.0, 5.0, 6.0, 0.0, 7.0, 8.0]);
        let (h, v) = reduce(&a);
        assert_eq!(h, a);
        assert_eq!(v, Matrix::identity(3));
    }

    #[test]
    fn small_sizes() {
        let (h1, v1) = reduce(&Matrix::from_rows(1, 1, &[3.0]));
        assert_eq!(h1[(0, 0)], 3.0);
        assert_eq!(v1[(0, 0)], 1.0);

        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let (h2, v2) = reduce(&a);
        assert_eq!(h2, a);
        assert_eq!(v2, Matrix::identity(2));
    }
}
