//! # Mixed integer linear programs
//!
//! A `Problem` holds the variables and constraints read from a problem file, together with the
//! values of a candidate solution. It can check that solution against the problem, and measure how
//! far the solution is from being feasible.
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use num_traits::{One, Zero};

use crate::config::Tolerances;
use crate::data::number_types::rational::Rational;
use crate::data::problem::constraint::{Constraint, Feasibility};
use crate::data::problem::constraint::linear::Activity;
use crate::data::problem::variable::{Variable, VariableId};

pub mod constraint;
pub mod variable;

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

/// Result of checking a solution, one flag per aspect.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CheckOutcome {
    /// All integer variables are integral.
    pub integrality: bool,
    /// All bounds and constraints are satisfied.
    pub linear: bool,
    /// A reported objective value exists, and it matches the solution.
    pub objective: bool,
}

/// Largest violations of a solution, one per aspect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violations {
    /// Largest distance of an integer variable to the nearest integer.
    pub integrality: Rational,
    /// Largest violation of a bound or constraint.
    pub linear: Rational,
    /// Difference between the computed and reported objective value, zero if none was reported.
    pub objective: Rational,
}

/// A mixed integer linear program together with a candidate solution.
///
/// Variables live in an arena and are referred to by `VariableId`. Both variables and constraints
/// are iterated in the lexicographic order of their names.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    /// Name of the problem.
    pub name: String,
    /// Name of the objective row, once known.
    pub objective_name: Option<String>,
    /// Direction of optimization.
    pub objective: Objective,
    /// Constant added to the objective function.
    pub objective_constant: Rational,
    /// Objective value claimed by the solution, if any.
    pub reported_objective: Option<Rational>,

    variables: Vec<Variable>,
    variable_index: BTreeMap<String, VariableId>,
    constraints: BTreeMap<String, Constraint>,
}

impl Problem {
    /// Create an empty problem.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Add a variable.
    ///
    /// A variable with the same name is replaced, and keeps its id.
    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        match self.variable_index.entry(variable.name.clone()) {
            Entry::Occupied(entry) => {
                let id = *entry.get();
                self.variables[id.index()] = variable;
                id
            },
            Entry::Vacant(entry) => {
                let id = VariableId(self.variables.len());
                self.variables.push(variable);
                *entry.insert(id)
            },
        }
    }

    /// Look up the id of a variable by name.
    #[must_use]
    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.variable_index.get(name).copied()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    #[allow(missing_docs)]
    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable {
        &mut self.variables[id.index()]
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn variable_by_name(&self, name: &str) -> Option<&Variable> {
        self.variable_id(name).map(|id| self.variable(id))
    }

    /// All variables, ordered by name.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variable_index.values().map(|&id| self.variable(id))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variables.len()
    }

    /// Add a constraint, replacing the constraint with the same name if there is one.
    ///
    /// # Return value
    ///
    /// The replaced constraint, if any.
    pub fn add_constraint(&mut self, constraint: impl Into<Constraint>) -> Option<Constraint> {
        let constraint = constraint.into();
        self.constraints.insert(constraint.name().to_string(), constraint)
    }

    /// Remove a constraint by name.
    pub fn remove_constraint(&mut self, name: &str) -> Option<Constraint> {
        self.constraints.remove(name)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    #[allow(missing_docs)]
    pub fn constraint_mut(&mut self, name: &str) -> Option<&mut Constraint> {
        self.constraints.get_mut(name)
    }

    /// All constraints, ordered by name.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The objective function evaluated at the current values, without the constant.
    fn objective_activity(&self) -> Activity {
        Activity::of(self.variables.iter().map(|variable| (&variable.cost, &variable.value)))
    }

    /// The objective function value of the current values, including the constant.
    #[must_use]
    pub fn objective_value(&self) -> Rational {
        &self.objective_constant + self.objective_activity().total()
    }

    /// Check the current values against the problem.
    ///
    /// Variables are checked first, until a bound or integrality check fails. Constraints are
    /// checked next, until one of them fails. The objective flag is only set if a reported
    /// objective value is present and it is close enough to the computed one.
    ///
    /// The bounds are checked with the linear tolerance.
    #[must_use]
    pub fn check(&self, tolerances: &Tolerances) -> CheckOutcome {
        let mut integrality = true;
        let mut linear = true;

        for variable in self.variables() {
            if !(integrality && linear) {
                break;
            }

            if !variable.is_within_bounds(&tolerances.linear) {
                tracing::warn!(
                    component = "checker",
                    operation = "check_bounds",
                    variable = %variable,
                    "Failed check for variable bounds"
                );
                linear = false;
            }
            if !variable.is_integral(&tolerances.integrality) {
                tracing::warn!(
                    component = "checker",
                    operation = "check_integrality",
                    variable = %variable,
                    "Failed check for variable integrality"
                );
                integrality = false;
            }
        }

        if linear {
            linear = self.constraints()
                .all(|constraint| constraint.is_feasible(&self.variables, &tolerances.linear));
        }

        let objective = self.reported_objective.as_ref()
            .is_some_and(|reported| self.check_objective(reported, &tolerances.linear));

        tracing::info!(
            component = "checker",
            operation = "check",
            integrality, linear, objective,
            "Checked solution"
        );

        CheckOutcome { integrality, linear, objective }
    }

    fn check_objective(&self, reported: &Rational, tolerance: &Rational) -> bool {
        let activity = self.objective_activity();
        let computed = &self.objective_constant + activity.total();

        let difference = (&computed - reported).abs();
        let correct = difference <= activity.relaxation(tolerance, &reported.abs());
        if !correct {
            tracing::warn!(
                component = "checker",
                operation = "check_objective",
                reported = %reported,
                computed = %computed,
                "Failed check for objective value"
            );
        }

        correct
    }

    /// The largest violations of the current values.
    ///
    /// Bound violations and constraint violations are both counted as linear violations.
    #[must_use]
    pub fn max_violations(&self) -> Violations {
        let mut integrality = Rational::zero();
        let mut linear = Rational::zero();

        for variable in self.variables() {
            integrality = integrality.max(variable.integrality_violation());
            linear = linear.max(variable.bound_violation());
        }
        for constraint in self.constraints() {
            linear = linear.max(constraint.violation(&self.variables));
        }

        let objective = self.reported_objective.as_ref()
            .map_or_else(Rational::zero, |reported| (self.objective_value() - reported).abs());

        Violations { integrality, linear, objective }
    }
}

/// `tolerance * max(1, magnitudes...)`.
///
/// The magnitudes are expected to be nonnegative.
pub(crate) fn scaled_tolerance<'a>(
    tolerance: &Rational,
    magnitudes: impl IntoIterator<Item = &'a Rational>,
) -> Rational {
    let one = Rational::one();
    let largest = magnitudes.into_iter().fold(&one, |largest, magnitude| largest.max(magnitude));

    tolerance * largest
}
