//! # Constraints
//!
//! Three kinds of constraints restrict the values of variables jointly. They are checked through
//! the `Feasibility` trait, which `Constraint` implements by dispatching to the variant.
use crate::data::number_types::rational::Rational;
use crate::data::problem::variable::Variable;

pub use indicator::IndicatorConstraint;
pub use linear::{ConstraintRelation, LinearConstraint};
pub use sos::{SosConstraint, SosType};

pub mod indicator;
pub mod linear;
pub mod sos;

/// Checking a constraint against the values of the variables of a problem.
pub trait Feasibility {
    /// Name, unique within a problem.
    fn name(&self) -> &str;

    /// Whether the constraint is satisfied up to the (relative) tolerance.
    ///
    /// # Arguments
    ///
    /// * `variables`: All variables of the problem, indexed by `VariableId`.
    /// * `tolerance`: Linear tolerance.
    fn is_feasible(&self, variables: &[Variable], tolerance: &Rational) -> bool;

    /// Size of the violation, zero if there is no violation at all.
    fn violation(&self, variables: &[Variable]) -> Rational;
}

/// Any constraint that can be part of a problem.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Constraint {
    Linear(LinearConstraint),
    Sos(SosConstraint),
    Indicator(IndicatorConstraint),
}

impl Feasibility for Constraint {
    fn name(&self) -> &str {
        match self {
            Constraint::Linear(constraint) => constraint.name(),
            Constraint::Sos(constraint) => constraint.name(),
            Constraint::Indicator(constraint) => constraint.name(),
        }
    }

    fn is_feasible(&self, variables: &[Variable], tolerance: &Rational) -> bool {
        match self {
            Constraint::Linear(constraint) => constraint.is_feasible(variables, tolerance),
            Constraint::Sos(constraint) => constraint.is_feasible(variables, tolerance),
            Constraint::Indicator(constraint) => constraint.is_feasible(variables, tolerance),
        }
    }

    fn violation(&self, variables: &[Variable]) -> Rational {
        match self {
            Constraint::Linear(constraint) => constraint.violation(variables),
            Constraint::Sos(constraint) => constraint.violation(variables),
            Constraint::Indicator(constraint) => constraint.violation(variables),
        }
    }
}

impl From<LinearConstraint> for Constraint {
    fn from(constraint: LinearConstraint) -> Self {
        Constraint::Linear(constraint)
    }
}

impl From<SosConstraint> for Constraint {
    fn from(constraint: SosConstraint) -> Self {
        Constraint::Sos(constraint)
    }
}

impl From<IndicatorConstraint> for Constraint {
    fn from(constraint: IndicatorConstraint) -> Self {
        Constraint::Indicator(constraint)
    }
}
