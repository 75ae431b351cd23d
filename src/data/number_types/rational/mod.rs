//! # An arbitrary precision rational type
//!
//! All values read from problem and solution files, as well as every quantity derived from them
//! while checking, are represented with this type. It wraps `num_rational::BigRational` following
//! the newtype pattern, such that the operations needed for certification (integrality distance,
//! fused multiply-add, exact decimal parsing) can be provided as methods.
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

pub use parse::ParseRationalError;

mod macros;
mod parse;
mod wrapping;

/// An exact fraction, always kept in lowest terms with a positive denominator.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Rational(BigRational);

impl Rational {
    /// Create a new instance by converting the two provided numbers into arbitrary size ints.
    ///
    /// # Panics
    ///
    /// When the denominator is zero.
    #[must_use]
    pub fn new(numer: i64, denom: i64) -> Self {
        Self(BigRational::new(numer.into(), denom.into()))
    }

    /// Create a new instance from arbitrary size numerator and denominator.
    ///
    /// # Panics
    ///
    /// When the denominator is zero.
    #[must_use]
    pub fn from_big(numer: BigInt, denom: BigInt) -> Self {
        Self(BigRational::new(numer, denom))
    }

    /// Exact conversion of a binary floating point value.
    ///
    /// Note that this is not the decimal value that is printed for the float: `0.1` becomes
    /// `3602879701896397/36028797018963968`.
    ///
    /// # Return value
    ///
    /// `None` if the value is not finite.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        BigRational::from_f64(value).map(Self)
    }

    /// Closest float, only to be used for reporting.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// The numerator of the fraction in lowest terms.
    #[must_use]
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// The denominator of the fraction in lowest terms, always positive.
    #[must_use]
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// Whether the value is strictly larger than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Whether the value is strictly smaller than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add the product of two values to this value: `self += left * right`.
    ///
    /// Used for computing dot products such as row activities.
    pub fn add_product(&mut self, left: &Rational, right: &Rational) {
        self.0 += &left.0 * &right.0;
    }

    /// Distance of this value to the integer closest to it.
    ///
    /// # Return value
    ///
    /// A value in `[0, 1/2]`: the fractional part of the absolute value, or one minus that part if
    /// it exceeds one half.
    #[must_use]
    pub fn distance_to_nearest_integer(&self) -> Self {
        if self.0.denom().is_one() {
            return Self::zero();
        }

        let denominator = self.0.denom();
        let remainder = self.0.numer().abs().mod_floor(denominator);
        let fractional = BigRational::new(remainder, denominator.clone());

        if fractional > BigRational::new(1.into(), 2.into()) {
            Self(BigRational::one() - fractional)
        } else {
            Self(fractional)
        }
    }

    /// Whether this value is integer up to the given tolerance.
    #[must_use]
    pub fn is_integer(&self, tolerance: &Rational) -> bool {
        self.0.denom().is_one() || self.distance_to_nearest_integer() <= *tolerance
    }
}

impl fmt::Display for Rational {
    /// Canonical `numerator/denominator` representation, only the numerator for integers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
