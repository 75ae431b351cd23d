//! # Tolerances
//!
//! The tolerances used while certifying a solution. Both are relative: they get scaled by the
//! magnitude of the values involved in each individual comparison.
use std::str::FromStr;

use num_traits::Zero;

use crate::data::number_types::rational::{ParseRationalError, Rational};

/// Default for both the linear and the integrality tolerance: `1/10000`.
pub const DEFAULT_TOLERANCE: (i64, i64) = (1, 10_000);

/// A tolerance given as text that can't be used.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ToleranceError {
    /// The text is not a number.
    #[error(transparent)]
    Number(#[from] ParseRationalError),
    /// Tolerances can't be below zero.
    #[error("negative tolerance \"{0}\"")]
    Negative(String),
}

/// Tolerances to check a solution against.
///
/// The linear tolerance is used for variable bounds, linear constraints, special ordered sets and
/// the objective value. The integrality tolerance is the maximum distance of an integer variable's
/// value to the nearest integer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tolerances {
    /// Maximum distance to the nearest integer.
    pub integrality: Rational,
    /// Relative tolerance for all other comparisons.
    pub linear: Rational,
}

impl Tolerances {
    /// Create tolerances where the integrality tolerance is equal to the linear tolerance.
    #[must_use]
    pub fn new(linear: Rational) -> Self {
        Self { integrality: linear.clone(), linear }
    }

    /// Override the integrality tolerance.
    #[must_use]
    pub fn with_integrality(mut self, integrality: Rational) -> Self {
        self.integrality = integrality;
        self
    }

    /// Read tolerances from text, as given on the command line.
    ///
    /// # Arguments
    ///
    /// * `linear`: Text of the linear tolerance, the default is used if absent.
    /// * `integrality`: Text of the integrality tolerance, follows the linear tolerance if absent.
    ///
    /// # Errors
    ///
    /// If one of the texts is not a valid number, or if it is negative.
    pub fn parse(
        linear: Option<&str>,
        integrality: Option<&str>,
    ) -> Result<Self, ToleranceError> {
        let tolerances = match linear {
            Some(text) => Self::new(parse_tolerance(text)?),
            None => Self::default(),
        };

        Ok(match integrality {
            Some(text) => tolerances.with_integrality(parse_tolerance(text)?),
            None => tolerances,
        })
    }
}

fn parse_tolerance(text: &str) -> Result<Rational, ToleranceError> {
    let value = Rational::from_str(text)?;
    if value < Rational::zero() {
        return Err(ToleranceError::Negative(text.to_string()));
    }

    Ok(value)
}

impl Default for Tolerances {
    fn default() -> Self {
        let (numer, denom) = DEFAULT_TOLERANCE;
        Self::new(Rational::new(numer, denom))
    }
}

#[cfg(test)]
mod test {
    use crate::config::{ToleranceError, Tolerances};
    use crate::R;

    #[test]
    fn defaults() {
        let tolerances = Tolerances::default();
        assert_eq!(tolerances.linear, R!(1, 10_000));
        assert_eq!(tolerances.integrality, R!(1, 10_000));
    }

    #[test]
    fn integrality_follows_linear() {
        let tolerances = Tolerances::parse(Some("1e-6"), None).unwrap();
        assert_eq!(tolerances.linear, R!(1, 1_000_000));
        assert_eq!(tolerances.integrality, R!(1, 1_000_000));

        let tolerances = Tolerances::parse(Some("1e-6"), Some("0.01")).unwrap();
        assert_eq!(tolerances.linear, R!(1, 1_000_000));
        assert_eq!(tolerances.integrality, R!(1, 100));

        let tolerances = Tolerances::parse(None, Some("1/3")).unwrap();
        assert_eq!(tolerances.linear, R!(1, 10_000));
        assert_eq!(tolerances.integrality, R!(1, 3));
    }

    #[test]
    fn malformed() {
        assert!(Tolerances::parse(Some("tiny"), None).is_err());
        assert!(Tolerances::parse(None, Some("1e")).is_err());
    }

    #[test]
    fn negative() {
        assert_eq!(
            Tolerances::parse(Some("-1e-6"), None),
            Err(ToleranceError::Negative("-1e-6".to_string())),
        );
        assert_eq!(
            Tolerances::parse(None, Some("-1/3")),
            Err(ToleranceError::Negative("-1/3".to_string())),
        );
        assert_eq!(Tolerances::parse(Some("0"), Some("-0")).unwrap().integrality, R!(0, 1));
    }
}
