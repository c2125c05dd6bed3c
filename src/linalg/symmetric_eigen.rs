//! Symmetric eigenvalue path: Householder tridiagonalization followed
//! by the implicit-shift QL iteration.
//!
//! Ports of the classical EISPACK routines `tred2` and `tql2`, working
//! on the caller's matrix in place. `v` starts as a copy of the
//! symmetric input and finishes as the orthonormal eigenvector matrix;
//! `d` holds the eigenvalues in ascending order and `e` is the
//! sub-diagonal workspace, zeroed on completion.

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Householder reduction of a symmetric matrix to tridiagonal form,
/// accumulating the transformations into `v`.
///
/// On exit `d` holds the diagonal, `e[1..]` the sub-diagonal with
/// `e[0] = 0`, and `v` the accumulated orthogonal transform.
pub(crate) fn tred2<T: FloatScalar>(v: &mut Matrix<T>, d: &mut [T], e: &mut [T]) {
    let n = v.nrows();

    for j in 0..n {
        d[j] = v[(n - 1, j)];
    }

    // Householder reduction, working up from the last row.
    for i in (1..n).rev() {
        // Scale to avoid under/overflow.
        let mut scale = T::zero();
        let mut h = T::zero();
        for item in d.iter().take(i) {
            scale = scale + item.abs();
        }
        if scale == T::zero() {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[(i - 1, j)];
                v[(i, j)] = T::zero();
                v[(j, i)] = T::zero();
            }
        } else {
            // Generate the Householder vector.
            for item in d.iter_mut().take(i) {
                *item = *item / scale;
                h = h + *item * *item;
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > T::zero() {
                g = -g;
            }
            e[i] = scale * g;
            h = h - f * g;
            d[i - 1] = f - g;
            for item in e.iter_mut().take(i) {
                *item = T::zero();
            }

            // Apply the similarity transformation to the remaining rows.
            for j in 0..i {
                f = d[j];
                v[(j, i)] = f;
                g = e[j] + v[(j, j)] * f;
                for k in (j + 1)..i {
                    g = g + v[(k, j)] * d[k];
                    e[k] = e[k] + v[(k, j)] * f;
                }
                e[j] = g;
            }
            f = T::zero();
            for j in 0..i {
                e[j] = e[j] / h;
                f = f + e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] = e[j] - hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[(k, j)] = v[(k, j)] - (f * e[k] + g * d[k]);
                }
                d[j] = v[(i - 1, j)];
                v[(i, j)] = T::zero();
            }
        }
        d[i] = h;
    }

    // Accumulate the transformations.
    for i in 0..n.saturating_sub(1) {
        v[(n - 1, i)] = v[(i, i)];
        v[(i, i)] = T::one();
        let h = d[i + 1];
        if h != T::zero() {
            for k in 0..=i {
                d[k] = v[(k, i + 1)] / h;
            }
            for j in 0..=i {
                let mut g = T::zero();
                for k in 0..=i {
                    g = g + v[(k, i + 1)] * v[(k, j)];
                }
                for k in 0..=i {
                    v[(k, j)] = v[(k, j)] - g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[(k, i + 1)] = T::zero();
        }
    }
    for j in 0..n {
        d[j] = v[(n - 1, j)];
        v[(n - 1, j)] = T::zero();
    }
    v[(n - 1, n - 1)] = T::one();
    e[0] = T::zero();
}

/// Implicit-shift QL iteration on a symmetric tridiagonal matrix,
/// accumulating the rotations into `v` and sorting the eigenvalues
/// ascending with their eigenvector columns.
///
/// The deflation test compares each sub-diagonal against machine
/// epsilon times a running magnitude estimate; every pass strictly
/// shrinks the off-diagonal mass, so the loop terminates without an
/// iteration cap.
pub(crate) fn tql2<T: FloatScalar>(d: &mut [T], e: &mut [T], v: &mut Matrix<T>) {
    let n = d.len();
    for i in 1..n {
        e[i - 1] = e[i];
    }
    if n > 0 {
        e[n - 1] = T::zero();
    }

    let mut f = T::zero();
    let mut tst1 = T::zero();
    let eps = T::epsilon();

    for l in 0..n {
        // Find a small sub-diagonal element.
        tst1 = tst1.max(d[l].abs() + e[l].abs());
        let mut m = l;
        while m < n {
            if e[m].abs() <= eps * tst1 {
                break;
            }
            m += 1;
        }

        // An eigenvalue has split off when m == l; otherwise iterate.
        if m > l {
            loop {
                // Implicit shift from the trailing 2x2.
                let mut g = d[l];
                let two = T::coeff(2.0);
                let mut p = (d[l + 1] - g) / (two * e[l]);
                let mut r = p.hypot(T::one());
                if p < T::zero() {
                    r = -r;
                }
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for item in d.iter_mut().take(n).skip(l + 2) {
                    *item = *item - h;
                }
                f = f + h;

                // Implicit QL sweep back to l.
                p = d[m];
                let mut c = T::one();
                let mut c2 = c;
                let mut c3 = c;
                let el1 = e[l + 1];
                let mut s = T::zero();
                let mut s2 = T::zero();
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    g = c * e[i];
                    h = c * p;
                    r = p.hypot(e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g;
                    d[i + 1] = h + s * (c * g + s * d[i]);

                    // Accumulate the rotation.
                    for k in 0..n {
                        h = v[(k, i + 1)];
                        v[(k, i + 1)] = s * v[(k, i)] + c * h;
                        v[(k, i)] = c * v[(k, i)] - s * h;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if e[l].abs() <= eps * tst1 {
                    break;
                }
            }
        }
        d[l] = d[l] + f;
        e[l] = T::zero();
    }

    // Sort eigenvalues ascending, permuting eigenvector columns in
    // lock-step. Ties keep the first-found position.
    for i in 0..n.saturating_sub(1) {
        let mut k = i;
        let mut p = d[i];
        for j in (i + 1)..n {
            if d[j] < p {
                k = j;
                p = d[j];
            }
        }
        if k != i {
            d[k] = d[i];
            d[i] = p;
            for j in 0..n {
                let t = v[(j, i)];
                v[(j, i)] = v[(j, k)];
                v[(j, k)] = t;
            }
        }
    }
}
