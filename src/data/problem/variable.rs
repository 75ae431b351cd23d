//! # Variables
//!
//! A variable has a domain given by its type and bounds, a coefficient in the objective function
//! and the value assigned to it by the solution being checked.
use std::fmt;

use num_traits::Zero;

use crate::data::number_types::rational::Rational;
use crate::data::problem::scaled_tolerance;

/// Index of a variable in the arena of a `Problem`.
///
/// Constraints refer to variables only through this index, never by owning them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VariableId(pub(crate) usize);

impl VariableId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain restriction on top of the bounds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VariableType {
    /// Integer in `[0, 1]`.
    Binary,
    /// Integer within the bounds.
    Integer,
    /// Either zero, or within the bounds.
    SemiContinuous,
    /// Any value within the bounds.
    Continuous,
}

impl VariableType {
    /// Whether values of this type need to be integral.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, VariableType::Binary | VariableType::Integer)
    }
}

/// A variable, with its value in the candidate solution.
///
/// Bounds that are `None` are infinite.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    /// Unique within a problem.
    pub name: String,
    #[allow(missing_docs)]
    pub variable_type: VariableType,
    #[allow(missing_docs)]
    pub lower_bound: Option<Rational>,
    #[allow(missing_docs)]
    pub upper_bound: Option<Rational>,
    #[allow(missing_docs)]
    pub cost: Rational,
    /// Zero until a solution assigns a value.
    pub value: Rational,
}

impl Variable {
    /// Create a variable with the default domain of its type.
    ///
    /// Binary variables are bounded by `[0, 1]`, all others by `[0, +inf)`.
    #[must_use]
    pub fn new(name: impl Into<String>, variable_type: VariableType) -> Self {
        let upper_bound = match variable_type {
            VariableType::Binary => Some(Rational::from(1)),
            _ => None,
        };

        Self {
            name: name.into(),
            variable_type,
            lower_bound: Some(Rational::zero()),
            upper_bound,
            cost: Rational::zero(),
            value: Rational::zero(),
        }
    }

    /// Set both bounds.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: Option<Rational>, upper_bound: Option<Rational>) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Set the objective function coefficient.
    #[must_use]
    pub fn with_cost(mut self, cost: Rational) -> Self {
        self.cost = cost;
        self
    }

    /// Set the value.
    #[must_use]
    pub fn with_value(mut self, value: Rational) -> Self {
        self.value = value;
        self
    }

    fn is_exempt_from_bounds(&self) -> bool {
        self.variable_type == VariableType::SemiContinuous && self.value.is_zero()
    }

    /// Whether the value lies within the bounds, relaxed by the tolerance.
    ///
    /// Each side is relaxed by `tolerance * max(1, |bound|, |value|)`. A semi-continuous variable at
    /// zero is always within its bounds.
    #[must_use]
    pub fn is_within_bounds(&self, tolerance: &Rational) -> bool {
        if self.is_exempt_from_bounds() {
            return true;
        }

        let magnitude = self.value.abs();
        let above_lower = self.lower_bound.as_ref().is_none_or(|lower| {
            let relaxation = scaled_tolerance(tolerance, [&lower.abs(), &magnitude]);
            self.value >= lower - relaxation
        });
        let below_upper = self.upper_bound.as_ref().is_none_or(|upper| {
            let relaxation = scaled_tolerance(tolerance, [&upper.abs(), &magnitude]);
            self.value <= upper + relaxation
        });

        above_lower && below_upper
    }

    /// Whether the value is integral up to the tolerance, if the type requires it.
    #[must_use]
    pub fn is_integral(&self, tolerance: &Rational) -> bool {
        !self.variable_type.is_integer() || self.value.is_integer(tolerance)
    }

    /// By how much the value lies outside of the bounds, zero if it doesn't.
    #[must_use]
    pub fn bound_violation(&self) -> Rational {
        if self.is_exempt_from_bounds() {
            return Rational::zero();
        }

        let below = self.lower_bound.as_ref()
            .map(|lower| lower - &self.value)
            .filter(Rational::is_positive);
        let above = self.upper_bound.as_ref()
            .map(|upper| &self.value - upper)
            .filter(Rational::is_positive);

        below.max(above).unwrap_or_else(Rational::zero)
    }

    /// Distance of the value to the nearest integer, zero for types that need no integrality.
    #[must_use]
    pub fn integrality_violation(&self) -> Rational {
        if self.variable_type.is_integer() {
            self.value.distance_to_nearest_integer()
        } else {
            Rational::zero()
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |bound: &Option<Rational>, infinity: &str| match bound {
            Some(value) => value.to_string(),
            None => infinity.to_string(),
        };

        write!(
            f, "{} {:?} [{}, {}] cost {} value {}",
            self.name, self.variable_type,
            show(&self.lower_bound, "-inf"), show(&self.upper_bound, "+inf"),
            self.cost, self.value,
        )
    }
}

#[cfg(test)]
mod test {
    use crate::data::problem::variable::{Variable, VariableType};
    use crate::R;

    #[test]
    fn default_domain() {
        let x = Variable::new("x", VariableType::Continuous);
        assert_eq!(x.lower_bound, Some(R!(0, 1)));
        assert_eq!(x.upper_bound, None);

        let b = Variable::new("b", VariableType::Binary);
        assert_eq!(b.upper_bound, Some(R!(1, 1)));
    }

    #[test]
    fn bounds_relative_tolerance() {
        let x = Variable::new("x", VariableType::Continuous)
            .with_bounds(Some(R!(0, 1)), Some(R!(10, 1)))
            .with_value(R!(10.00005));
        assert!(x.is_within_bounds(&R!(1, 10_000)));
        assert!(!x.is_within_bounds(&R!(1, 1_000_000)));
        assert_eq!(x.bound_violation(), R!(5, 100_000));
    }

    #[test]
    fn bounds_scale_with_value() {
        let x = Variable::new("x", VariableType::Continuous)
            .with_bounds(None, Some(R!(1000, 1)))
            .with_value(R!(1000.05));
        // relaxation is 1e-4 * 1000.05
        assert!(x.is_within_bounds(&R!(1, 10_000)));
        assert!(!x.is_within_bounds(&R!(1, 100_000)));

        let y = Variable::new("y", VariableType::Continuous)
            .with_bounds(Some(R!(-1000, 1)), None)
            .with_value(R!(-100_009, 100));
        assert!(y.is_within_bounds(&R!(1, 10_000)));
        assert!(!y.is_within_bounds(&R!(1, 100_000)));
    }

    #[test]
    fn infinite_bounds() {
        let x = Variable::new("x", VariableType::Continuous)
            .with_bounds(None, None)
            .with_value(-R!(1e300));
        assert!(x.is_within_bounds(&R!(0, 1)));
        assert_eq!(x.bound_violation(), R!(0, 1));
    }

    #[test]
    fn semi_continuous() {
        let x = Variable::new("x", VariableType::SemiContinuous)
            .with_bounds(Some(R!(2, 1)), Some(R!(5, 1)));
        assert!(x.is_within_bounds(&R!(0, 1)));
        assert_eq!(x.bound_violation(), R!(0, 1));

        let x = x.with_value(R!(1, 1));
        assert!(!x.is_within_bounds(&R!(1, 10_000)));
        assert_eq!(x.bound_violation(), R!(1, 1));
        assert!(x.with_value(R!(3, 1)).is_within_bounds(&R!(0, 1)));
    }

    #[test]
    fn integrality() {
        let tolerance = R!(1, 10_000);
        let x = Variable::new("x", VariableType::Integer).with_value(R!(7, 2));
        assert!(!x.is_integral(&tolerance));
        assert_eq!(x.integrality_violation(), R!(1, 2));

        let x = x.with_value(R!(3.00001));
        assert!(x.is_integral(&tolerance));
        assert_eq!(x.integrality_violation(), R!(1, 100_000));

        let y = Variable::new("y", VariableType::Continuous).with_value(R!(7, 2));
        assert!(y.is_integral(&tolerance));
        assert_eq!(y.integrality_violation(), R!(0, 1));

        let z = Variable::new("z", VariableType::SemiContinuous).with_value(R!(7, 2));
        assert!(z.is_integral(&R!(0, 1)));
    }
}
