//! Finite field GF(2) arithmetic.
//!
//! This module contains the scalar type [`GF2`] used as the element of all
//! bit matrices in this crate. Addition is XOR and multiplication is AND, so
//! an `Array2<GF2>` behaves as a matrix over the two-element field under the
//! usual `ndarray` operations.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Not, Sub, SubAssign};
use ndarray::ScalarOperand;
use num_traits::{One, Zero};

/// An element of the finite field GF(2).
///
/// The ordering of elements (one sorts after zero) is what makes rows of a
/// bit matrix comparable lexicographically.
///
/// # Examples
/// ```
/// # use ldpc_bp::gf2::GF2;
/// use num_traits::{One, Zero};
/// assert_eq!(GF2::one() + GF2::one(), GF2::zero());
/// assert_eq!(GF2::from(3u8), GF2::one());
/// assert_eq!(u8::from(GF2::one()), 1);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct GF2(u8);

impl GF2 {
    /// Returns the element as a `bool`, with one mapping to `true`.
    pub fn as_bool(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for GF2 {
    fn from(value: bool) -> GF2 {
        GF2(u8::from(value))
    }
}

impl From<u8> for GF2 {
    /// Converts an integer by reducing it modulo 2.
    fn from(value: u8) -> GF2 {
        GF2(value & 1)
    }
}

impl From<GF2> for u8 {
    fn from(value: GF2) -> u8 {
        value.0
    }
}

impl From<GF2> for bool {
    fn from(value: GF2) -> bool {
        value.as_bool()
    }
}

impl Zero for GF2 {
    fn zero() -> GF2 {
        GF2(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn set_zero(&mut self) {
        self.0 = 0;
    }
}

impl One for GF2 {
    fn one() -> GF2 {
        GF2(1)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }

    fn set_one(&mut self) {
        self.0 = 1;
    }
}

impl Add for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: GF2) -> GF2 {
        GF2(self.0 ^ rhs.0)
    }
}

impl Sub for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: GF2) -> GF2 {
        self + rhs
    }
}

impl Mul for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: GF2) -> GF2 {
        GF2(self.0 & rhs.0)
    }
}

impl Div for GF2 {
    type Output = GF2;

    /// # Panics
    ///
    /// Panics on division by zero.
    fn div(self, rhs: GF2) -> GF2 {
        if rhs.is_zero() {
            panic!("division by zero in GF(2)");
        }
        self
    }
}

impl Not for GF2 {
    type Output = GF2;

    fn not(self) -> GF2 {
        GF2(self.0 ^ 1)
    }
}

macro_rules! forward_ops {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident);+ $(;)?) => {$(
        impl $trait<&GF2> for GF2 {
            type Output = GF2;
            fn $method(self, rhs: &GF2) -> GF2 {
                self.$method(*rhs)
            }
        }

        impl $assign for GF2 {
            fn $assign_method(&mut self, rhs: GF2) {
                *self = self.$method(rhs);
            }
        }

        impl $assign<&GF2> for GF2 {
            fn $assign_method(&mut self, rhs: &GF2) {
                *self = self.$method(*rhs);
            }
        }
    )+};
}

forward_ops! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
}

impl ScalarOperand for GF2 {}

impl fmt::Display for GF2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
