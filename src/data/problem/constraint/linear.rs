//! # Linear constraints
//!
//! A linear constraint bounds a weighted sum of variables from below, above, or both sides.
use num_traits::Zero;

use crate::data::number_types::rational::Rational;
use crate::data::problem::constraint::Feasibility;
use crate::data::problem::scaled_tolerance;
use crate::data::problem::variable::{Variable, VariableId};

/// Which sides of a row are bounded.
///
/// This determines how right-hand side and range values apply to the row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintRelation {
    /// Only bounded from above.
    Less,
    /// Both sides are bounded by the same value.
    Equal,
    /// Only bounded from below.
    Greater,
    /// Bounded from both sides by possibly different values.
    Ranged,
}

/// `lhs <= sum coefficient_i * x_i <= rhs`.
///
/// Sides that are `None` are infinite.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearConstraint {
    name: String,
    relation: ConstraintRelation,
    /// Lower side.
    pub lhs: Option<Rational>,
    /// Upper side.
    pub rhs: Option<Rational>,
    coefficients: Vec<(VariableId, Rational)>,
}

impl LinearConstraint {
    /// Create a constraint without coefficients, with zero for every bounded side.
    ///
    /// A `Ranged` relation starts out like `Equal`.
    #[must_use]
    pub fn new(name: impl Into<String>, relation: ConstraintRelation) -> Self {
        let (lhs, rhs) = match relation {
            ConstraintRelation::Less => (None, Some(Rational::zero())),
            ConstraintRelation::Greater => (Some(Rational::zero()), None),
            ConstraintRelation::Equal | ConstraintRelation::Ranged =>
                (Some(Rational::zero()), Some(Rational::zero())),
        };

        Self { name: name.into(), relation, lhs, rhs, coefficients: Vec::new() }
    }

    /// Create a constraint with explicit sides.
    #[must_use]
    pub fn ranged(name: impl Into<String>, lhs: Option<Rational>, rhs: Option<Rational>) -> Self {
        Self {
            name: name.into(),
            relation: ConstraintRelation::Ranged,
            lhs,
            rhs,
            coefficients: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn relation(&self) -> ConstraintRelation {
        self.relation
    }

    /// Coefficients in insertion order.
    #[must_use]
    pub fn coefficients(&self) -> &[(VariableId, Rational)] {
        &self.coefficients
    }

    /// Append a term. Repeated variables are not merged.
    pub fn push(&mut self, variable: VariableId, coefficient: Rational) {
        self.coefficients.push((variable, coefficient));
    }

    /// Apply a right-hand side value to the bounded sides of the row.
    ///
    /// For a `Less` row it becomes the upper side, for a `Greater` row the lower side, and for an
    /// `Equal` or `Ranged` row both sides.
    pub fn set_right_hand_side(&mut self, value: Rational) {
        match self.relation {
            ConstraintRelation::Less => self.rhs = Some(value),
            ConstraintRelation::Greater => self.lhs = Some(value),
            ConstraintRelation::Equal | ConstraintRelation::Ranged => {
                self.lhs = Some(value.clone());
                self.rhs = Some(value);
            },
        }
    }

    /// Turn the row into a ranged row, using the side it already has as a reference.
    ///
    /// # Return value
    ///
    /// `false` if the row was already ranged, in which case nothing changes.
    pub fn apply_range(&mut self, range: &Rational) -> bool {
        match self.relation {
            ConstraintRelation::Less => {
                self.lhs = self.rhs.as_ref().map(|rhs| rhs - range.abs());
            },
            ConstraintRelation::Greater => {
                self.rhs = self.lhs.as_ref().map(|lhs| lhs + range.abs());
            },
            ConstraintRelation::Equal => {
                let side = if range.is_positive() { &mut self.rhs } else { &mut self.lhs };
                if let Some(value) = side {
                    *value += range;
                }
            },
            ConstraintRelation::Ranged => return false,
        }

        self.relation = ConstraintRelation::Ranged;
        true
    }

    /// Compute the activity of the row with the given variable values.
    #[must_use]
    pub fn activity(&self, variables: &[Variable]) -> Activity {
        Activity::of(self.coefficients.iter()
            .map(|(variable, coefficient)| (coefficient, &variables[variable.index()].value)))
    }
}

impl Feasibility for LinearConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_feasible(&self, variables: &[Variable], tolerance: &Rational) -> bool {
        let activity = self.activity(variables);
        let total = activity.total();

        let above_lhs = self.lhs.as_ref().is_none_or(|lhs| {
            total >= lhs - activity.relaxation(tolerance, &lhs.abs())
        });
        let below_rhs = self.rhs.as_ref().is_none_or(|rhs| {
            total <= rhs + activity.relaxation(tolerance, &rhs.abs())
        });

        if !(above_lhs && below_rhs) {
            tracing::warn!(
                component = "checker",
                operation = "check_linear",
                constraint = %self.name,
                activity = total.to_f64(),
                lhs = ?self.lhs.as_ref().map(Rational::to_f64),
                rhs = ?self.rhs.as_ref().map(Rational::to_f64),
                "Failed check for linear constraint"
            );
        }

        above_lhs && below_rhs
    }

    fn violation(&self, variables: &[Variable]) -> Rational {
        let activity = self.activity(variables).total();

        let below = self.lhs.as_ref()
            .map(|lhs| lhs - &activity)
            .filter(Rational::is_positive);
        let above = self.rhs.as_ref()
            .map(|rhs| &activity - rhs)
            .filter(Rational::is_positive);

        below.max(above).unwrap_or_else(Rational::zero)
    }
}

/// A sum of products, with positive and negative terms accumulated separately.
///
/// The magnitudes of both parts determine the tolerance when comparing the sum, so that
/// cancellation doesn't make the comparison stricter than the size of the terms justifies.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Activity {
    /// Sum of the positive products.
    pub positive: Rational,
    /// Sum of the negative products, not positive itself.
    pub negative: Rational,
}

impl Activity {
    /// Accumulate `(coefficient, value)` products.
    pub fn of<'a>(terms: impl IntoIterator<Item = (&'a Rational, &'a Rational)>) -> Self {
        let mut activity = Self::default();
        for (coefficient, value) in terms {
            let product = coefficient * value;
            if product.is_positive() {
                activity.positive += product;
            } else {
                activity.negative += product;
            }
        }

        activity
    }

    /// The complete sum.
    #[must_use]
    pub fn total(&self) -> Rational {
        &self.positive + &self.negative
    }

    /// `tolerance * max(1, positive, |negative|, reference)`.
    #[must_use]
    pub fn relaxation(&self, tolerance: &Rational, reference: &Rational) -> Rational {
        scaled_tolerance(tolerance, [&self.positive, &self.negative.abs(), reference])
    }
}

#[cfg(test)]
mod test {
    use crate::data::problem::constraint::Feasibility;
    use crate::data::problem::constraint::linear::{Activity, ConstraintRelation, LinearConstraint};
    use crate::data::problem::variable::{Variable, VariableId, VariableType};
    use crate::R;

    fn variables(values: &[(i64, i64)]) -> Vec<Variable> {
        values.iter().enumerate()
            .map(|(i, &(numer, denom))| {
                Variable::new(format!("x{}", i), VariableType::Continuous)
                    .with_value(R!(numer, denom))
            })
            .collect()
    }

    fn sum_of_first_two(relation: ConstraintRelation) -> LinearConstraint {
        let mut constraint = LinearConstraint::new("c", relation);
        constraint.push(VariableId(0), R!(1, 1));
        constraint.push(VariableId(1), R!(1, 1));
        constraint
    }

    #[test]
    fn relative_tolerance() {
        // x + y <= 10 with x = 6, y = 5
        let variables = variables(&[(6, 1), (5, 1)]);
        let mut constraint = sum_of_first_two(ConstraintRelation::Less);
        constraint.set_right_hand_side(R!(10, 1));

        assert!(constraint.is_feasible(&variables, &R!(1, 10)));
        assert!(!constraint.is_feasible(&variables, &R!(1, 1000)));
        assert_eq!(constraint.violation(&variables), R!(1, 1));
    }

    #[test]
    fn tolerance_scales_with_both_parts() {
        // 1000 x - 1000 y >= 1 with x = y = 1: activity 0, parts of magnitude 1000
        let variables = variables(&[(1, 1), (1, 1)]);
        let mut constraint = LinearConstraint::new("c", ConstraintRelation::Greater);
        constraint.push(VariableId(0), R!(1000, 1));
        constraint.push(VariableId(1), R!(-1000, 1));
        constraint.set_right_hand_side(R!(1, 1));

        assert!(constraint.is_feasible(&variables, &R!(1, 1000)));
        assert!(!constraint.is_feasible(&variables, &R!(1, 10_000)));
    }

    #[test]
    fn duplicate_terms_are_summed() {
        let variables = variables(&[(3, 1)]);
        let mut constraint = LinearConstraint::new("c", ConstraintRelation::Equal);
        constraint.push(VariableId(0), R!(1, 1));
        constraint.push(VariableId(0), R!(1, 1));
        constraint.set_right_hand_side(R!(6, 1));

        assert_eq!(constraint.coefficients().len(), 2);
        assert!(constraint.is_feasible(&variables, &R!(0, 1)));
    }

    #[test]
    fn right_hand_side() {
        let mut less = LinearConstraint::new("l", ConstraintRelation::Less);
        less.set_right_hand_side(R!(5, 1));
        assert_eq!((less.lhs, less.rhs), (None, Some(R!(5, 1))));

        let mut greater = LinearConstraint::new("g", ConstraintRelation::Greater);
        greater.set_right_hand_side(R!(5, 1));
        assert_eq!((greater.lhs, greater.rhs), (Some(R!(5, 1)), None));

        let mut equal = LinearConstraint::new("e", ConstraintRelation::Equal);
        equal.set_right_hand_side(R!(5, 1));
        assert_eq!((equal.lhs, equal.rhs), (Some(R!(5, 1)), Some(R!(5, 1))));
    }

    #[test]
    fn ranges() {
        let mut less = LinearConstraint::new("l", ConstraintRelation::Less);
        less.set_right_hand_side(R!(5, 1));
        assert!(less.apply_range(&R!(-2, 1)));
        assert_eq!((less.lhs.clone(), less.rhs.clone()), (Some(R!(3, 1)), Some(R!(5, 1))));
        assert_eq!(less.relation(), ConstraintRelation::Ranged);
        assert!(!less.apply_range(&R!(1, 1)));

        let mut greater = LinearConstraint::new("g", ConstraintRelation::Greater);
        greater.set_right_hand_side(R!(5, 1));
        assert!(greater.apply_range(&R!(-2, 1)));
        assert_eq!((greater.lhs, greater.rhs), (Some(R!(5, 1)), Some(R!(7, 1))));

        let mut equal = LinearConstraint::new("e", ConstraintRelation::Equal);
        equal.set_right_hand_side(R!(5, 1));
        assert!(equal.apply_range(&R!(2, 1)));
        assert_eq!((equal.lhs, equal.rhs), (Some(R!(5, 1)), Some(R!(7, 1))));

        let mut equal = LinearConstraint::new("e", ConstraintRelation::Equal);
        equal.set_right_hand_side(R!(5, 1));
        assert!(equal.apply_range(&R!(-2, 1)));
        assert_eq!((equal.lhs, equal.rhs), (Some(R!(3, 1)), Some(R!(5, 1))));
    }

    #[test]
    fn violation_is_exact() {
        let variables = variables(&[(1, 3), (1, 3)]);
        let mut constraint = sum_of_first_two(ConstraintRelation::Greater);
        constraint.set_right_hand_side(R!(1, 1));
        assert_eq!(constraint.violation(&variables), R!(1, 3));

        let free = LinearConstraint::ranged("free", None, None);
        assert_eq!(free.violation(&variables), R!(0, 1));
        assert!(free.is_feasible(&variables, &R!(0, 1)));
    }

    #[test]
    fn activity_parts() {
        let coefficients = [R!(2, 1), R!(-3, 1), R!(1, 2)];
        let values = [R!(1, 1), R!(2, 1), R!(0, 1)];
        let activity = Activity::of(coefficients.iter().zip(values.iter()));
        assert_eq!(activity.positive, R!(2, 1));
        assert_eq!(activity.negative, R!(-6, 1));
        assert_eq!(activity.total(), R!(-4, 1));
        assert_eq!(activity.relaxation(&R!(1, 10), &R!(1, 1)), R!(6, 10));
    }
}
