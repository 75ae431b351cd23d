//! # Indicator constraints
//!
//! A constraint that only needs to hold when a binary variable takes a certain value.
use num_traits::Zero;

use crate::data::number_types::rational::Rational;
use crate::data::problem::constraint::{Constraint, Feasibility};
use crate::data::problem::variable::{Variable, VariableId};

/// `trigger = trigger_value -> consequent`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndicatorConstraint {
    name: String,
    trigger: VariableId,
    trigger_value: bool,
    consequent: Box<Constraint>,
}

impl IndicatorConstraint {
    /// Wrap a constraint such that it is conditional on the value of the trigger variable.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        trigger: VariableId,
        trigger_value: bool,
        consequent: Constraint,
    ) -> Self {
        Self { name: name.into(), trigger, trigger_value, consequent: Box::new(consequent) }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn trigger(&self) -> VariableId {
        self.trigger
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn trigger_value(&self) -> bool {
        self.trigger_value
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn consequent(&self) -> &Constraint {
        &self.consequent
    }

    /// Whether the trigger has the value that activates the consequent.
    ///
    /// The trigger value is compared to one half, at exactly one half both values activate.
    fn is_active(&self, variables: &[Variable]) -> bool {
        let half = Rational::new(1, 2);
        let value = &variables[self.trigger.index()].value;

        if self.trigger_value { *value >= half } else { *value <= half }
    }
}

impl Feasibility for IndicatorConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_feasible(&self, variables: &[Variable], tolerance: &Rational) -> bool {
        if !self.is_active(variables) || self.consequent.is_feasible(variables, tolerance) {
            true
        } else {
            tracing::warn!(
                component = "checker",
                operation = "check_indicator",
                constraint = %self.name,
                trigger = %variables[self.trigger.index()].name,
                "Failed check for indicator constraint"
            );
            false
        }
    }

    fn violation(&self, variables: &[Variable]) -> Rational {
        if self.is_active(variables) {
            self.consequent.violation(variables)
        } else {
            Rational::zero()
        }
    }
}
