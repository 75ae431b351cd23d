//! # Special ordered sets
use itertools::Itertools;
use num_traits::Zero;

use crate::data::number_types::rational::Rational;
use crate::data::problem::constraint::Feasibility;
use crate::data::problem::variable::{Variable, VariableId};

/// How many members may be nonzero.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SosType {
    /// At most one member is nonzero.
    One,
    /// At most two members are nonzero, and if two, they are consecutive.
    Two,
}

/// An ordered set of variables of which only a few may take a nonzero value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SosConstraint {
    name: String,
    sos_type: SosType,
    members: Vec<VariableId>,
}

impl SosConstraint {
    /// Create an empty set.
    #[must_use]
    pub fn new(name: impl Into<String>, sos_type: SosType) -> Self {
        Self { name: name.into(), sos_type, members: Vec::new() }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn sos_type(&self) -> SosType {
        self.sos_type
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[VariableId] {
        &self.members
    }

    /// Append a member at the end of the order.
    pub fn push(&mut self, variable: VariableId) {
        self.members.push(variable);
    }

    /// Positions in the order of the members that lie outside of `[-tolerance, tolerance]`.
    fn nonzero_positions<'a>(
        &'a self,
        variables: &'a [Variable],
        tolerance: &'a Rational,
    ) -> impl Iterator<Item = usize> + 'a {
        self.members.iter()
            .positions(move |variable| variables[variable.index()].value.abs() > *tolerance)
    }
}

impl Feasibility for SosConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_feasible(&self, variables: &[Variable], tolerance: &Rational) -> bool {
        let mut nonzero = self.nonzero_positions(variables, tolerance);

        let feasible = match self.sos_type {
            SosType::One => nonzero.nth(1).is_none(),
            SosType::Two => match (nonzero.next(), nonzero.next(), nonzero.next()) {
                (_, None, _) => true,
                (Some(first), Some(second), None) => second == first + 1,
                _ => false,
            },
        };

        if !feasible {
            tracing::warn!(
                component = "checker",
                operation = "check_sos",
                constraint = %self.name,
                sos_type = ?self.sos_type,
                "Failed check for special ordered set"
            );
        }

        feasible
    }

    /// There is no meaningful size of a violation of a combinatorial constraint.
    fn violation(&self, _variables: &[Variable]) -> Rational {
        Rational::zero()
    }
}
