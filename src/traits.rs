//! Element traits for matrix entries.
//!
//! [`Scalar`] is the minimal bound for storage and exact arithmetic
//! (add, multiply, transpose); it is blanket-implemented, so integer
//! matrices work out of the box. [`FloatScalar`] adds the floating-point
//! operations the decompositions need (`sqrt`, `hypot`, `abs`, machine
//! epsilon) and is implemented for `f32` and `f64`.

use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Types usable as matrix elements.
///
/// Blanket-implemented for anything satisfying the bounds, which covers
/// all primitive integer and float types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T> Scalar for T where T: Copy + PartialEq + Debug + Zero + One + Num {}

/// Floating-point matrix elements, required by norms and decompositions.
pub trait FloatScalar: Scalar + Float {
    /// Promote an `f64` algorithm coefficient (shift constants and the
    /// like) into `Self`.
    fn coeff(c: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn coeff(c: f64) -> $t {
                    c as $t
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
