//! Double-shift implicit QR iteration on an upper Hessenberg matrix,
//! the second stage of the nonsymmetric eigenvalue path.
//!
//! Port of the classical EISPACK `hqr2`: deflates 1x1 and 2x2 blocks
//! off the bottom of the active window, recording real eigenvalues in
//! `d` and conjugate pairs as `d[k] = d[k+1]` with `e[k] = -e[k+1] > 0`,
//! then back-substitutes for the eigenvectors and transforms them
//! through the accumulated orthogonal matrix. Stalls are broken by the
//! ad hoc shifts of the reference iteration (Wilkinson's at 10 sweeps,
//! the exceptional 0.964 shift at 30), which restart progress rather
//! than abort, so the iteration needs no failure path.

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Complex scalar division `x / y`, dividing by the larger component
/// first to avoid overflow.
pub(crate) fn cdiv<T: FloatScalar>(xr: T, xi: T, yr: T, yi: T) -> (T, T) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Reduce the upper Hessenberg matrix `h` to real Schur form,
/// accumulating transformations into `v` and leaving the eigenvalues
/// in `d` (real parts) and `e` (imaginary parts). On exit the columns
/// of `v` hold the eigenvectors: real columns for real eigenvalues,
/// consecutive (real, imaginary) column pairs for complex ones.
#[allow(clippy::too_many_lines)]
pub(crate) fn hqr2<T: FloatScalar>(
    h: &mut Matrix<T>,
    v: &mut Matrix<T>,
    d: &mut [T],
    e: &mut [T],
) {
    let nn = h.nrows();
    let low = 0;
    let high = nn - 1;
    let eps = T::epsilon();
    let mut exshift = T::zero();

    let mut p;
    let mut q;
    let mut r = T::zero();
    let mut s = T::zero();
    let mut z = T::zero();
    let mut t;
    let mut w;
    let mut x;
    let mut y;

    // 1-norm of the Hessenberg part, used in the deflation tests.
    let mut norm = T::zero();
    for i in 0..nn {
        for j in i.saturating_sub(1)..nn {
            norm = norm + h[(i, j)].abs();
        }
    }

    // Outer loop over the active window; `en` is its bottom row.
    let mut iter = 0usize;
    let mut n = nn;
    while n > 0 {
        let en = n - 1;

        // Look for a single small sub-diagonal element.
        let mut l = en;
        while l > low {
            s = h[(l - 1, l - 1)].abs() + h[(l, l)].abs();
            if s == T::zero() {
                s = norm;
            }
            if h[(l, l - 1)].abs() < eps * s {
                break;
            }
            l -= 1;
        }

        if l == en {
            // One root found.
            h[(en, en)] = h[(en, en)] + exshift;
            d[en] = h[(en, en)];
            e[en] = T::zero();
            n -= 1;
            iter = 0;
        } else if l == en - 1 {
            // Two roots found.
            w = h[(en, en - 1)] * h[(en - 1, en)];
            p = (h[(en - 1, en - 1)] - h[(en, en)]) / T::coeff(2.0);
            q = p * p + w;
            z = q.abs().sqrt();
            h[(en, en)] = h[(en, en)] + exshift;
            h[(en - 1, en - 1)] = h[(en - 1, en - 1)] + exshift;
            x = h[(en, en)];

            if q >= T::zero() {
                // Real pair.
                z = if p >= T::zero() { p + z } else { p - z };
                d[en - 1] = x + z;
                d[en] = d[en - 1];
                if z != T::zero() {
                    d[en] = x - w / z;
                }
                e[en - 1] = T::zero();
                e[en] = T::zero();
                x = h[(en, en - 1)];
                s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                r = (p * p + q * q).sqrt();
                p = p / r;
                q = q / r;

                // Row modification.
                for j in (en - 1)..nn {
                    z = h[(en - 1, j)];
                    h[(en - 1, j)] = q * z + p * h[(en, j)];
                    h[(en, j)] = q * h[(en, j)] - p * z;
                }
                // Column modification.
                for i in 0..=en {
                    z = h[(i, en - 1)];
                    h[(i, en - 1)] = q * z + p * h[(i, en)];
                    h[(i, en)] = q * h[(i, en)] - p * z;
                }
                // Accumulate transformations.
                for i in low..=high {
                    z = v[(i, en - 1)];
                    v[(i, en - 1)] = q * z + p * v[(i, en)];
                    v[(i, en)] = q * v[(i, en)] - p * z;
                }
            } else {
                // Complex pair.
                d[en - 1] = x + p;
                d[en] = x + p;
                e[en - 1] = z;
                e[en] = -z;
            }
            n -= 2;
            iter = 0;
        } else {
            // No convergence yet: form a shift.
            x = h[(en, en)];
            y = T::zero();
            w = T::zero();
            if l < en {
                y = h[(en - 1, en - 1)];
                w = h[(en, en - 1)] * h[(en - 1, en)];
            }

            // Wilkinson's original ad hoc shift.
            if iter == 10 {
                exshift = exshift + x;
                for i in low..=en {
                    h[(i, i)] = h[(i, i)] - x;
                }
                s = h[(en, en - 1)].abs() + h[(en - 1, en - 2)].abs();
                x = T::coeff(0.75) * s;
                y = x;
                w = T::coeff(-0.4375) * s * s;
            }

            // MATLAB's new ad hoc shift.
            if iter == 30 {
                s = (y - x) / T::coeff(2.0);
                s = s * s + w;
                if s > T::zero() {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / T::coeff(2.0) + s);
                    for i in low..=en {
                        h[(i, i)] = h[(i, i)] - s;
                    }
                    exshift = exshift + s;
                    x = T::coeff(0.964);
                    y = x;
                    w = x;
                }
            }

            iter += 1;

            // Look for two consecutive small sub-diagonal elements.
            let mut m = en - 2;
            loop {
                z = h[(m, m)];
                r = x - z;
                s = y - z;
                p = (r * s - w) / h[(m + 1, m)] + h[(m, m + 1)];
                q = h[(m + 1, m + 1)] - z - r - s;
                r = h[(m + 2, m + 1)];
                s = p.abs() + q.abs() + r.abs();
                p = p / s;
                q = q / s;
                r = r / s;
                if m == l {
                    break;
                }
                if h[(m, m - 1)].abs() * (q.abs() + r.abs())
                    < eps
                        * (p.abs()
                            * (h[(m - 1, m - 1)].abs() + z.abs() + h[(m + 1, m + 1)].abs()))
                {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=en {
                h[(i, i - 2)] = T::zero();
                if i > m + 2 {
                    h[(i, i - 3)] = T::zero();
                }
            }

            // Double QR step over rows l..=en, columns m..=en.
            for k in m..en {
                let notlast = k != en - 1;
                if k != m {
                    p = h[(k, k - 1)];
                    q = h[(k + 1, k - 1)];
                    r = if notlast { h[(k + 2, k - 1)] } else { T::zero() };
                    x = p.abs() + q.abs() + r.abs();
                    if x == T::zero() {
                        continue;
                    }
                    p = p / x;
                    q = q / x;
                    r = r / x;
                }
                s = (p * p + q * q + r * r).sqrt();
                if p < T::zero() {
                    s = -s;
                }
                if s != T::zero() {
                    if k != m {
                        h[(k, k - 1)] = -s * x;
                    } else if l != m {
                        h[(k, k - 1)] = -h[(k, k - 1)];
                    }
                    p = p + s;
                    x = p / s;
                    y = q / s;
                    z = r / s;
                    q = q / p;
                    r = r / p;

                    // Row modification.
                    for j in k..nn {
                        p = h[(k, j)] + q * h[(k + 1, j)];
                        if notlast {
                            p = p + r * h[(k + 2, j)];
                            h[(k + 2, j)] = h[(k + 2, j)] - p * z;
                        }
                        h[(k, j)] = h[(k, j)] - p * x;
                        h[(k + 1, j)] = h[(k + 1, j)] - p * y;
                    }
                    // Column modification.
                    for i in 0..=en.min(k + 3) {
                        p = x * h[(i, k)] + y * h[(i, k + 1)];
                        if notlast {
                            p = p + z * h[(i, k + 2)];
                            h[(i, k + 2)] = h[(i, k + 2)] - p * r;
                        }
                        h[(i, k)] = h[(i, k)] - p;
                        h[(i, k + 1)] = h[(i, k + 1)] - p * q;
                    }
                    // Accumulate transformations.
                    for i in low..=high {
                        p = x * v[(i, k)] + y * v[(i, k + 1)];
                        if notlast {
                            p = p + z * v[(i, k + 2)];
                            v[(i, k + 2)] = v[(i, k + 2)] - p * r;
                        }
                        v[(i, k)] = v[(i, k)] - p;
                        v[(i, k + 1)] = v[(i, k + 1)] - p * q;
                    }
                }
            }
        }
    }

    // Back-substitute for the eigenvectors of the triangular form.
    if norm == T::zero() {
        return;
    }

    for en in (0..nn).rev() {
        p = d[en];
        q = e[en];

        if q == T::zero() {
            // Real eigenvalue, real vector.
            let mut l = en;
            h[(en, en)] = T::one();
            for i in (0..en).rev() {
                w = h[(i, i)] - p;
                r = T::zero();
                for j in l..=en {
                    r = r + h[(i, j)] * h[(j, en)];
                }
                if e[i] < T::zero() {
                    z = w;
                    s = r;
                } else {
                    l = i;
                    if e[i] == T::zero() {
                        if w != T::zero() {
                            h[(i, en)] = -r / w;
                        } else {
                            h[(i, en)] = -r / (eps * norm);
                        }
                    } else {
                        // Solve the real 2x2 block.
                        x = h[(i, i + 1)];
                        y = h[(i + 1, i)];
                        q = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                        t = (x * s - z * r) / q;
                        h[(i, en)] = t;
                        if x.abs() > z.abs() {
                            h[(i + 1, en)] = (-r - w * t) / x;
                        } else {
                            h[(i + 1, en)] = (-s - y * t) / z;
                        }
                    }

                    // Overflow control.
                    t = h[(i, en)].abs();
                    if (eps * t) * t > T::one() {
                        for j in i..=en {
                            h[(j, en)] = h[(j, en)] / t;
                        }
                    }
                }
            }
        } else if q < T::zero() {
            // Complex pair; the vector occupies columns en-1 and en.
            let mut l = en - 1;

            // Last vector component imaginary, so the matrix is
            // triangular below the pair.
            if h[(en, en - 1)].abs() > h[(en - 1, en)].abs() {
                h[(en - 1, en - 1)] = q / h[(en, en - 1)];
                h[(en - 1, en)] = -(h[(en, en)] - p) / h[(en, en - 1)];
            } else {
                let (cr, ci) = cdiv(T::zero(), -h[(en - 1, en)], h[(en - 1, en - 1)] - p, q);
                h[(en - 1, en - 1)] = cr;
                h[(en - 1, en)] = ci;
            }
            h[(en, en - 1)] = T::zero();
            h[(en, en)] = T::one();

            for i in (0..en - 1).rev() {
                let mut ra = T::zero();
                let mut sa = T::zero();
                for j in l..=en {
                    ra = ra + h[(i, j)] * h[(j, en - 1)];
                    sa = sa + h[(i, j)] * h[(j, en)];
                }
                w = h[(i, i)] - p;

                if e[i] < T::zero() {
                    z = w;
                    r = ra;
                    s = sa;
                } else {
                    l = i;
                    if e[i] == T::zero() {
                        let (cr, ci) = cdiv(-ra, -sa, w, q);
                        h[(i, en - 1)] = cr;
                        h[(i, en)] = ci;
                    } else {
                        // Solve the complex 2x2 block.
                        x = h[(i, i + 1)];
                        y = h[(i + 1, i)];
                        let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                        let vi = (d[i] - p) * T::coeff(2.0) * q;
                        if vr == T::zero() && vi == T::zero() {
                            vr = eps
                                * norm
                                * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                        }
                        let (cr, ci) = cdiv(
                            x * r - z * ra + q * sa,
                            x * s - z * sa - q * ra,
                            vr,
                            vi,
                        );
                        h[(i, en - 1)] = cr;
                        h[(i, en)] = ci;
                        if x.abs() > z.abs() + q.abs() {
                            h[(i + 1, en - 1)] =
                                (-ra - w * h[(i, en - 1)] + q * h[(i, en)]) / x;
                            h[(i + 1, en)] =
                                (-sa - w * h[(i, en)] - q * h[(i, en - 1)]) / x;
                        } else {
                            let (cr2, ci2) = cdiv(
                                -r - y * h[(i, en - 1)],
                                -s - y * h[(i, en)],
                                z,
                                q,
                            );
                            h[(i + 1, en - 1)] = cr2;
                            h[(i + 1, en)] = ci2;
                        }
                    }

                    // Overflow control.
                    t = h[(i, en - 1)].abs().max(h[(i, en)].abs());
                    if (eps * t) * t > T::one() {
                        for j in i..=en {
                            h[(j, en - 1)] = h[(j, en - 1)] / t;
                            h[(j, en)] = h[(j, en)] / t;
                        }
                    }
                }
            }
        }
        // q > 0 is the first member of a pair, handled with its partner.
    }

    // Transform the vectors back through the accumulated similarity.
    for j in (low..nn).rev() {
        for i in low..=high {
            z = T::zero();
            for k in low..=j.min(high) {
                z = z + v[(i, k)] * h[(k, j)];
            }
            v[(i, j)] = z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const TOL: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, msg: &str) {
        assert!((a - b).abs() < TOL, "{}: {} vs {}", msg, a, b);
    }

    fn run(a: &Matrix<f64>) -> (Vec<f64>, Vec<f64>, Matrix<f64>) {
        let n = a.nrows();
        let mut h = a.clone();
        let mut v = Matrix::identity(n);
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n];
        hqr2(&mut h, &mut v, &mut d, &mut e);
        (d, e, v)
    }

    #[test]
    fn cdiv_real_denominator() {
        let (re, im) = cdiv(1.0, 2.0, 2.0, 0.0);
        assert_near(re, 0.5, "re");
        assert_near(im, 1.0, "im");
    }

    #[test]
    fn cdiv_imag_denominator() {
        // (1 + 0i) / (0 + 1i) = -i
        let (re, im) = cdiv(1.0, 0.0, 0.0, 1.0);
        assert_near(re, 0.0, "re");
        assert_near(im, -1.0, "im");
    }

    #[test]
    fn rotation_matrix_pure_imaginary_pair() {
        let a = Matrix::from_rows(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        let (d, e, _) = run(&a);
        assert_near(d[0], 0.0, "re_0");
        assert_near(d[1], 0.0, "re_1");
        assert!(e[0] > 0.0 && e[1] < 0.0, "conjugate order");
        assert_near(e[0], 1.0, "im_0");
        assert_near(e[1], -1.0, "im_1");
    }

    #[test]
    fn triangular_eigenvalues_on_diagonal() {
        let a = Matrix::from_rows(3, 3, &[
            3.0, 1.0, -2.0, //
            0.0, -1.0, 4.0, //
            0.0, 0.0, 2.0,
        ]);
        let (d, e, _) = run(&a);
        assert_near(d[0], 3.0, "d0");
        assert_near(d[1], -1.0, "d1");
        assert_near(d[2], 2.0, "d2");
        for ei in e {
            assert_eq!(ei, 0.0);
        }
    }

    #[test]
    fn companion_matrix_roots() {
        // Companion form of x^3 - 6x^2 + 11x - 6 = (x-1)(x-2)(x-3).
        let a = Matrix::from_rows(3, 3, &[
            6.0, -11.0, 6.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0,
        ]);
        let (mut d, e, _) = run(&a);
        for ei in e {
            assert!(ei.abs() < TOL, "all roots real");
        }
        d.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_near(d[0], 1.0, "root 1");
        assert_near(d[1], 2.0, "root 2");
        assert_near(d[2], 3.0, "root 3");
    }

    #[test]
    fn real_eigenvectors_satisfy_definition() {
        let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 0.0, 3.0]);
        let (d, _, v) = run(&a);
        for (k, &lambda) in d.iter().enumerate() {
            for i in 0..2 {
                let av = a[(i, 0)] * v[(0, k)] + a[(i, 1)] * v[(1, k)];
                assert_near(av, lambda * v[(i, k)], "A*v = lambda*v");
            }
        }
    }
}
