//! # realmat
//!
//! Dense real-matrix decompositions in pure Rust, built on the
//! classical LINPACK/EISPACK algorithms:
//!
//! - [`Matrix<T>`] — row-major dense matrix with runtime dimensions,
//!   basic algebra, submatrix extraction, and norms
//! - [`LuDecomposition`] — LU with partial pivoting: `solve`,
//!   `inverse`, `det`
//! - [`QrDecomposition`] — Householder QR: orthogonal factors and
//!   least-squares `solve`
//! - [`EigenDecomposition`] — symmetric (tridiagonal + QL) and general
//!   (Hessenberg + double-shift QR) eigenvalue paths, complex pairs
//!   represented as 2x2 real blocks
//!
//! Decompositions copy their input and defer rank/singularity failures
//! to the point of use; see the [`linalg`] module docs.
//!
//! ## Quick start
//!
//! ```
//! use realmat::Matrix;
//!
//! let a = Matrix::from_rows(3, 3, &[
//!     1.0_f64, 2.0, 3.0,
//!     4.0, 5.0, 6.0,
//!     7.0, 8.0, 10.0,
//! ]);
//!
//! // Determinant and linear solve via LU.
//! assert!((a.det().unwrap() + 3.0).abs() < 1e-10);
//! let b = Matrix::from_rows(3, 1, &[6.0, 15.0, 25.0]);
//! let x = a.solve(&b).unwrap();
//! assert!((x[(0, 0)] - 1.0).abs() < 1e-10);
//!
//! // Symmetric eigenvalues, ascending.
//! let s = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
//! let d = s.eigenvalues().unwrap();
//! assert!((d[0] - 1.0).abs() < 1e-10 && (d[1] - 3.0).abs() < 1e-10);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Description                                   |
//! |---------|---------|-----------------------------------------------|
//! | `std`   | yes     | Float math via the platform libm              |
//! | `libm`  | no      | Pure-Rust float math for `no_std` targets     |
//!
//! The crate is `no_std`-compatible but always requires `alloc`, since
//! matrices are runtime-sized.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{EigenDecomposition, LinalgError, LuDecomposition, QrDecomposition};
pub use matrix::Matrix;
pub use traits::{FloatScalar, Scalar};
