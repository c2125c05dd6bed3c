//! Randomized decomposition laws, checked on seeded inputs across a
//! range of sizes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use realmat::Matrix;

const TOL: f64 = 1e-9;
const SIZES: &[usize] = &[2, 3, 5, 10, 25, 50];

fn random_matrix(rng: &mut StdRng, m: usize, n: usize) -> Matrix<f64> {
    Matrix::from_fn(m, n, |_, _| rng.gen_range(-1.0..1.0))
}

/// Random symmetric matrix with entries in [-1, 1].
fn random_symmetric(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    let mut a = random_matrix(rng, n, n);
    for i in 0..n {
        for j in 0..i {
            let v = a[(i, j)];
            a[(j, i)] = v;
        }
    }
    a
}

/// Random diagonally dominant matrix; comfortably nonsingular.
fn random_dominant(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    let mut a = random_matrix(rng, n, n);
    for i in 0..n {
        a[(i, i)] = a[(i, i)] + n as f64;
    }
    a
}

fn assert_matrix_near(a: &Matrix<f64>, b: &Matrix<f64>, msg: &str) {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()), "{}", msg);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            let (x, y) = (a[(i, j)], b[(i, j)]);
            assert!(
                (x - y).abs() < TOL,
                "{} at ({}, {}): {} vs {}",
                msg,
                i,
                j,
                x,
                y,
            );
        }
    }
}

#[test]
fn lu_reconstructs_permuted_input() {
    let mut rng = StdRng::seed_from_u64(1);
    for &n in SIZES {
        let a = random_matrix(&mut rng, n, n);
        let lu = a.lu();
        let rebuilt = lu.l().matmul(&lu.u()).unwrap();
        let permuted = a.select_rows(lu.piv(), 0, n - 1).unwrap();
        assert_matrix_near(&rebuilt, &permuted, "A(piv,:) = L*U");
    }
}

#[test]
fn qr_reconstructs_and_q_is_orthonormal() {
    let mut rng = StdRng::seed_from_u64(2);
    for &n in SIZES {
        let m = n + n / 2 + 1;
        let a = random_matrix(&mut rng, m, n);
        let qr = a.qr().unwrap();
        let q = qr.q();
        assert_matrix_near(&q.matmul(&qr.r()).unwrap(), &a, "Q*R = A");
        assert_matrix_near(
            &q.transpose().matmul(&q).unwrap(),
            &Matrix::identity(n),
            "Q^T*Q = I",
        );
    }
}

#[test]
fn symmetric_eigen_laws() {
    let mut rng = StdRng::seed_from_u64(3);
    for &n in SIZES {
        let a = random_symmetric(&mut rng, n);
        let eig = a.eig().unwrap();
        assert!(eig.is_symmetric());

        let d = eig.real_eigenvalues();
        for w in d.windows(2) {
            assert!(w[0] <= w[1], "eigenvalues ascending");
        }

        let v = eig.v();
        assert_matrix_near(
            &v.transpose().matmul(v).unwrap(),
            &Matrix::identity(n),
            "V^T*V = I",
        );
        assert_matrix_near(
            &v.matmul(&eig.d()).unwrap().matmul(&v.transpose()).unwrap(),
            &a,
            "V*D*V^T = A",
        );
    }
}

#[test]
fn general_eigen_satisfies_av_equals_vd() {
    let mut rng = StdRng::seed_from_u64(4);
    for &n in SIZES {
        let a = random_matrix(&mut rng, n, n);
        let eig = a.eig().unwrap();
        let av = a.matmul(eig.v()).unwrap();
        let vd = eig.v().matmul(&eig.d()).unwrap();
        assert_matrix_near(&av, &vd, "A*V = V*D");

        // Complex eigenvalues come in adjacent conjugate pairs.
        let (d, e) = (eig.real_eigenvalues(), eig.imag_eigenvalues());
        let mut i = 0;
        while i < n {
            if e[i] != 0.0 {
                assert!(e[i] > 0.0, "pair starts with positive imaginary part");
                assert_eq!(d[i], d[i + 1], "pair shares its real part");
                assert_eq!(e[i], -e[i + 1], "conjugate imaginary parts");
                i += 2;
            } else {
                i += 1;
            }
        }
    }
}

#[test]
fn solve_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);
    for &n in SIZES {
        let a = random_dominant(&mut rng, n);
        let x = random_matrix(&mut rng, n, 3);
        let b = a.matmul(&x).unwrap();
        let solved = a.solve(&b).unwrap();
        assert_matrix_near(&solved, &x, "solve(A, A*x) = x");
    }
}

#[test]
fn inverse_times_original_is_identity() {
    let mut rng = StdRng::seed_from_u64(6);
    for &n in SIZES {
        let a = random_dominant(&mut rng, n);
        let inv = a.inverse().unwrap();
        assert_matrix_near(
            &inv.matmul(&a).unwrap(),
            &Matrix::identity(n),
            "inv(A)*A = I",
        );
    }
}

#[test]
fn least_squares_residual_orthogonal_to_columns() {
    let mut rng = StdRng::seed_from_u64(7);
    for &n in &[2usize, 4, 8] {
        let m = 3 * n;
        let a = random_matrix(&mut rng, m, n);
        let b = random_matrix(&mut rng, m, 1);
        let x = a.solve(&b).unwrap();
        let residual = &b - &a.matmul(&x).unwrap();
        let projected = a.transpose().matmul(&residual).unwrap();
        assert_matrix_near(&projected, &Matrix::zeros(n, 1), "A^T*(b - A*x) = 0");
    }
}

#[test]
fn det_laws() {
    assert_eq!(Matrix::<f64>::identity(6).det().unwrap(), 1.0);

    // A zero row forces a zero pivot.
    let mut rng = StdRng::seed_from_u64(8);
    let mut a = random_matrix(&mut rng, 5, 5);
    for j in 0..5 {
        a[(2, j)] = 0.0;
    }
    assert_eq!(a.det().unwrap(), 0.0);
    assert!(!a.lu().is_nonsingular());

    // det(A*B) = det(A) * det(B), up to roundoff.
    let a = random_matrix(&mut rng, 4, 4);
    let b = random_matrix(&mut rng, 4, 4);
    let lhs = a.matmul(&b).unwrap().det().unwrap();
    let rhs = a.det().unwrap() * b.det().unwrap();
    assert!((lhs - rhs).abs() < TOL, "det product law: {} vs {}", lhs, rhs);
}
