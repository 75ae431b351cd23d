//! # Importing MPS files
//!
//! Reading of `.mps` files, or files of the Mathematical Programming System format, into a
//! `Problem`.
//!
//! Besides the classic sections, the `OBJSENSE`, `OBJNAME`, `USERCUTS`, `LAZYCONS`, `SOS` and
//! `INDICATORS` extensions are supported. Both the fixed and the free layout are read, see the
//! `line` module.
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::data::number_types::rational::Rational;
use crate::data::problem::{Objective, Problem};
use crate::data::problem::constraint::{
    Constraint, ConstraintRelation, Feasibility, IndicatorConstraint, LinearConstraint,
    SosConstraint, SosType,
};
use crate::data::problem::variable::{Variable, VariableId, VariableType};
use crate::io::error::{Import, InconsistencyError, ParseError, ParseResult};
use crate::io::mps::line::{Content, Line, Lines, Marker};
use crate::io::mps::token::{
    DEFAULT_BOUND_SET, DEFAULT_NAME, DEFAULT_RANGE_SET, DEFAULT_RHS_SET, INDICATOR, NAME,
};

mod line;
mod token;

/// Read a problem in the MPS format.
///
/// # Arguments
///
/// * `reader`: Source of the program text, read line by line.
///
/// # Errors
///
/// Parse errors if the file format is found out to be wrong, inconsistency errors if e.g. a row is
/// mentioned that wasn't declared in advance.
pub fn parse(reader: impl BufRead) -> Result<Problem, Import> {
    let mut parser = Parser::new(reader);
    parser.parse()?;

    tracing::info!(
        component = "mps",
        operation = "parse",
        status = "success",
        name = %parser.problem.name,
        layout = ?parser.lines.layout(),
        variables = parser.problem.nr_variables(),
        constraints = parser.problem.nr_constraints(),
        "Read problem"
    );

    Ok(parser.problem)
}

/// MPS files are divided into sections.
///
/// # Note
///
/// The `Endata` variant (notice the odd spelling) denotes the end of the file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Section {
    Name,
    ObjectiveSense,
    ObjectiveName,
    /// Also used for the `USERCUTS` and `LAZYCONS` sections, which declare rows in the same way.
    Rows,
    Columns,
    Rhs,
    Ranges,
    Bounds,
    Sos,
    Indicators,
    Endata,
}

impl Section {
    /// Whether this section may start when the `previous` section ends.
    ///
    /// The `ROWS` section may be repeated, the `SOS` and `INDICATORS` sections may come in either
    /// order.
    fn may_follow(self, previous: Section) -> bool {
        use Section::*;

        match previous {
            Name => matches!(self, ObjectiveSense | ObjectiveName | Rows),
            ObjectiveSense => matches!(self, ObjectiveName | Rows),
            ObjectiveName => self == Rows,
            Rows => matches!(self, Rows | Columns),
            Columns => matches!(self, Rhs | Ranges | Bounds | Sos | Indicators | Endata),
            Rhs => matches!(self, Ranges | Bounds | Sos | Indicators | Endata),
            Ranges => matches!(self, Bounds | Sos | Indicators | Endata),
            Bounds | Sos | Indicators => matches!(self, Sos | Indicators | Endata),
            Endata => false,
        }
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            NAME => Ok(Section::Name),
            "OBJSENSE" | "OBJSEN" => Ok(Section::ObjectiveSense),
            "OBJNAME" => Ok(Section::ObjectiveName),
            "ROWS" | "USERCUTS" | "LAZYCONS" => Ok(Section::Rows),
            "COLUMNS" => Ok(Section::Columns),
            "RHS" => Ok(Section::Rhs),
            "RANGES" => Ok(Section::Ranges),
            "BOUNDS" => Ok(Section::Bounds),
            "SOS" => Ok(Section::Sos),
            "INDICATORS" => Ok(Section::Indicators),
            "ENDATA" => Ok(Section::Endata),
            _ => Err(ParseError::new(format!("Unknown section header \"{}\".", text))),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Name => "NAME",
            Section::ObjectiveSense => "OBJSENSE",
            Section::ObjectiveName => "OBJNAME",
            Section::Rows => "ROWS",
            Section::Columns => "COLUMNS",
            Section::Rhs => "RHS",
            Section::Ranges => "RANGES",
            Section::Bounds => "BOUNDS",
            Section::Sos => "SOS",
            Section::Indicators => "INDICATORS",
            Section::Endata => "ENDATA",
        })
    }
}

/// Every row is either a cost row or some constraint.
#[derive(Debug, Eq, PartialEq)]
enum RowType {
    Cost,
    Constraint(ConstraintRelation),
}

impl FromStr for RowType {
    type Err = ParseError;

    /// The type of a row is denoted by `N` if it's the cost row, or a free row. Constraint rows are
    /// indicated by `L`, `E` or `G`. Only the first character is considered.
    fn from_str(word: &str) -> Result<RowType, Self::Err> {
        match word.chars().next() {
            Some('N') => Ok(RowType::Cost),
            Some('L') => Ok(RowType::Constraint(ConstraintRelation::Less)),
            Some('E') => Ok(RowType::Constraint(ConstraintRelation::Equal)),
            Some('G') => Ok(RowType::Constraint(ConstraintRelation::Greater)),
            _ => Err(ParseError::new(format!("Row type \"{}\" unknown.", word))),
        }
    }
}

/// The MPS format defines the `BoundType`s described in this enum.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum BoundType {
    /// b <- x (< +inf)
    LowerContinuous,
    /// (0 <=) x <= b
    UpperContinuous,
    /// x = b
    Fixed,
    /// -inf < x < +inf
    Free,
    /// -inf < x (<= 0)
    LowerMinusInfinity,
    /// (0 <=) x < +inf
    UpperInfinity,
    /// x = 0 or 1
    Binary,
    /// b <= x ( +inf)
    LowerInteger,
    /// (0 <=) x <= b
    UpperInteger,
    /// x = 0 or l =< x =< b
    SemiContinuous,
}

impl BoundType {
    /// Whether a value follows the column name.
    fn has_value(self) -> bool {
        !matches!(
            self,
            BoundType::Free | BoundType::LowerMinusInfinity | BoundType::UpperInfinity | BoundType::Binary,
        )
    }

    /// Whether a bound of this type keeps a binary variable binary, given the value of the bound.
    ///
    /// Only a lower bound of zero or an upper bound of one does.
    fn keeps_binary(self, value: &Rational) -> bool {
        match self {
            BoundType::LowerContinuous => *value == 0,
            BoundType::UpperContinuous => *value == 1,
            _ => false,
        }
    }
}

impl FromStr for BoundType {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "LO" => Ok(BoundType::LowerContinuous),
            "UP" => Ok(BoundType::UpperContinuous),
            "FX" => Ok(BoundType::Fixed),
            "FR" => Ok(BoundType::Free),
            "MI" => Ok(BoundType::LowerMinusInfinity),
            "PL" => Ok(BoundType::UpperInfinity),
            "BV" => Ok(BoundType::Binary),
            "LI" => Ok(BoundType::LowerInteger),
            "UI" => Ok(BoundType::UpperInteger),
            "SC" => Ok(BoundType::SemiContinuous),
            _ => Err(ParseError::new(format!("Bound type \"{}\" unknown.", text))),
        }
    }
}

/// State while reading a problem, section by section.
struct Parser<R> {
    lines: Lines<R>,
    problem: Problem,
    section: Section,
    /// Sections read so far, to reject repetitions.
    seen: HashSet<Section>,
    /// Rows of type `N` other than the objective, they are ignored wherever referenced.
    free_rows: HashSet<String>,
    /// Whether the objective direction was read in the current `OBJSENSE` section.
    objective_sense_read: bool,
    /// Type of new columns, switched by markers.
    integer_block: bool,
    /// Column of the previous line in the `COLUMNS` section.
    last_column: Option<(String, VariableId)>,
    /// Only values of the first range vector are used.
    range_vector: Option<String>,
    /// Number of unnamed special ordered sets.
    unnamed_sets: usize,
    /// Set that new members are added to.
    current_set: Option<String>,
}

impl<R: BufRead> Parser<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            problem: Problem::default(),
            section: Section::Name,
            seen: HashSet::new(),
            free_rows: HashSet::new(),
            objective_sense_read: false,
            integer_block: false,
            last_column: None,
            range_vector: None,
            unnamed_sets: 0,
            current_set: None,
        }
    }

    fn parse(&mut self) -> Result<(), Import> {
        self.parse_name()?;

        while let Some(line) = self.lines.next(self.section)? {
            match &line.content {
                Content::Section { header, argument } => {
                    let next = Section::from_str(header)
                        .map_err(|e| ParseError::with_location(e.description(), line.location()))?;
                    self.start_section(next, argument.as_deref(), &line)?;
                    if next == Section::Endata {
                        return Ok(());
                    }
                },
                Content::Marker(marker) => self.read_marker(*marker, &line)?,
                Content::Data(fields) => {
                    let fields = fields.iter().map(String::as_str).collect::<Vec<_>>();
                    self.read_data(&fields)
                        .map_err(|error| locate(error, &line))?;
                },
            }
        }

        Err(ParseError::new(format!("File ended in the {} section, before ENDATA.", self.section)).into())
    }

    /// Read the program name from the first meaningful line.
    fn parse_name(&mut self) -> Result<(), Import> {
        let line = self.lines.next(Section::Name)?
            .ok_or_else(|| ParseError::new("No line to read, is the file empty?"))?;

        match &line.content {
            Content::Section { header, argument } if header == NAME => {
                self.problem.name = argument.clone().unwrap_or_else(|| DEFAULT_NAME.to_string());
                self.seen.insert(Section::Name);
                Ok(())
            },
            _ => Err(ParseError::with_location(
                format!("Expected a \"{}\" indicator.", NAME), line.location(),
            ).into()),
        }
    }

    fn start_section(&mut self, next: Section, argument: Option<&str>, line: &Line) -> Result<(), Import> {
        let repeated = next != Section::Rows && self.seen.contains(&next);
        if repeated || !next.may_follow(self.section) {
            return Err(ParseError::with_location(
                format!("The {} section can't follow the {} section.", next, self.section),
                line.location(),
            ).into());
        }
        if self.section == Section::ObjectiveSense && !self.objective_sense_read {
            return Err(ParseError::with_location(
                "The OBJSENSE section ended without a direction.", line.location(),
            ).into());
        }

        tracing::debug!(
            component = "mps",
            operation = "parse",
            section = %next,
            line = line.number,
            "Starting section"
        );

        self.section = next;
        self.seen.insert(next);

        match (next, argument) {
            (Section::ObjectiveSense, Some(direction)) => {
                self.problem.objective = parse_objective(direction)
                    .map_err(|e| ParseError::with_location(e.description(), line.location()))?;
                self.objective_sense_read = true;
            },
            (Section::ObjectiveName, Some(name)) => {
                self.problem.objective_name = Some(name.to_string());
            },
            _ => {},
        }

        Ok(())
    }

    fn read_marker(&mut self, marker: Marker, line: &Line) -> Result<(), Import> {
        if self.section != Section::Columns {
            return Err(ParseError::with_location(
                format!("Marker line in the {} section.", self.section), line.location(),
            ).into());
        }

        self.integer_block = marker == Marker::IntegerStart;
        Ok(())
    }

    /// Read a line of data in the current section.
    ///
    /// Errors are located at the line by the caller.
    fn read_data(&mut self, fields: &[&str]) -> Result<(), Import> {
        match self.section {
            Section::Name | Section::Endata => Err(ParseError::new(
                format!("Unexpected data in the {} section.", self.section),
            ).into()),
            Section::ObjectiveSense => self.read_objective_sense(fields),
            Section::ObjectiveName => {
                self.problem.objective_name = Some(fields[0].to_string());
                Ok(())
            },
            Section::Rows => self.read_row(fields),
            Section::Columns => self.read_column(fields),
            Section::Rhs => self.read_rhs(fields),
            Section::Ranges => self.read_range(fields),
            Section::Bounds => self.read_bound(fields),
            Section::Sos => self.read_sos(fields),
            Section::Indicators => self.read_indicator(fields),
        }
    }

    fn read_objective_sense(&mut self, fields: &[&str]) -> Result<(), Import> {
        if self.objective_sense_read {
            return Err(ParseError::new("Second objective direction.").into());
        }

        self.problem.objective = parse_objective(fields[0])?;
        self.objective_sense_read = true;
        Ok(())
    }

    fn read_row(&mut self, fields: &[&str]) -> Result<(), Import> {
        let [row_type, name] = required(fields)?;

        match RowType::from_str(row_type)? {
            RowType::Cost => match &self.problem.objective_name {
                None => self.problem.objective_name = Some(name.to_string()),
                Some(objective) if objective == name => {},
                Some(_) => {
                    tracing::debug!(component = "mps", operation = "parse", row = name, "Ignoring free row");
                    self.free_rows.insert(name.to_string());
                },
            },
            RowType::Constraint(relation) => {
                let replaced = self.problem.add_constraint(LinearConstraint::new(name, relation));
                if replaced.is_some() {
                    tracing::warn!(component = "mps", operation = "parse", row = name, "Row declared twice");
                }
            },
        }

        Ok(())
    }

    fn read_column(&mut self, fields: &[&str]) -> Result<(), Import> {
        let [column_name, row_name, value_text] = required(fields)?;

        let id = match &self.last_column {
            Some((name, id)) if name == column_name => *id,
            _ => {
                let variable_type = if self.integer_block {
                    VariableType::Integer
                } else {
                    VariableType::Continuous
                };
                let id = self.problem.add_variable(Variable::new(column_name, variable_type));
                self.last_column = Some((column_name.to_string(), id));
                id
            },
        };

        self.add_coefficient(id, row_name, value_text)?;
        if let Some(&row_name) = fields.get(3) {
            let value_text = fields.get(4)
                .ok_or_else(|| ParseError::new("Second row name without a value."))?;
            self.add_coefficient(id, row_name, value_text)?;
        }

        Ok(())
    }

    fn add_coefficient(&mut self, id: VariableId, row_name: &str, value_text: &str) -> Result<(), Import> {
        let value = parse_value(value_text)?;

        if self.is_objective(row_name) {
            self.problem.variable_mut(id).cost = value;
        } else if !self.free_rows.contains(row_name) {
            match self.problem.constraint_mut(row_name) {
                Some(Constraint::Linear(constraint)) => constraint.push(id, value),
                _ => return Err(unknown_row(row_name)),
            }
        }

        Ok(())
    }

    fn read_rhs(&mut self, fields: &[&str]) -> Result<(), Import> {
        let fields = with_set_name(fields, DEFAULT_RHS_SET);

        for [row_name, value_text] in pairs(&fields)? {
            let value = parse_value(value_text)?;
            let is_objective = self.is_objective(row_name);
            let is_free = self.free_rows.contains(row_name);

            match self.problem.constraint_mut(row_name) {
                Some(Constraint::Linear(constraint)) => constraint.set_right_hand_side(value),
                None if is_objective => self.problem.objective_constant = -value,
                None if is_free => {},
                _ => return Err(unknown_row(row_name)),
            }
        }

        Ok(())
    }

    fn read_range(&mut self, fields: &[&str]) -> Result<(), Import> {
        let fields = with_set_name(fields, DEFAULT_RANGE_SET);
        let entries = pairs(&fields)?;

        let vector = self.range_vector.get_or_insert_with(|| fields[0].to_string());
        if *vector != fields[0] {
            tracing::debug!(component = "mps", operation = "parse", vector = fields[0], "Ignoring range vector");
            return Ok(());
        }

        for [row_name, value_text] in entries {
            let value = parse_value(value_text)?;

            match self.problem.constraint_mut(row_name) {
                Some(Constraint::Linear(constraint)) => if !constraint.apply_range(&value) {
                    return Err(InconsistencyError::new(
                        format!("Second range for row \"{}\".", row_name),
                    ).into());
                },
                None if self.free_rows.contains(row_name) => {},
                _ => return Err(unknown_row(row_name)),
            }
        }

        Ok(())
    }

    fn read_bound(&mut self, fields: &[&str]) -> Result<(), Import> {
        let bound_type = BoundType::from_str(fields[0])?;

        // the set name is between the bound type and the column name
        let mut fields = fields.to_vec();
        let fields_without_set = if bound_type.has_value() { 3 } else { 2 };
        if fields.len() == fields_without_set {
            fields.insert(1, DEFAULT_BOUND_SET);
        }

        let [_, _, column_name] = required(&fields)?;
        let value = if bound_type.has_value() {
            let value_text = fields.get(3)
                .ok_or_else(|| ParseError::new(format!("Bound type \"{}\" needs a value.", fields[0])))?;
            parse_value(value_text)?
        } else {
            Rational::from(0)
        };

        let id = self.problem.variable_id(column_name).ok_or_else(|| unknown_column(column_name))?;
        apply_bound(self.problem.variable_mut(id), bound_type, value);

        Ok(())
    }

    fn read_sos(&mut self, fields: &[&str]) -> Result<(), Import> {
        let sos_type = match fields[0] {
            "S1" => Some(SosType::One),
            "S2" => Some(SosType::Two),
            _ => None,
        };

        match sos_type {
            Some(sos_type) => {
                let name = match fields.get(1) {
                    Some(name) => name.to_string(),
                    None => {
                        self.unnamed_sets += 1;
                        format!("SOS{}", self.unnamed_sets)
                    },
                };

                if self.problem.add_constraint(SosConstraint::new(name.clone(), sos_type)).is_some() {
                    tracing::warn!(component = "mps", operation = "parse", set = %name, "Constraint declared twice");
                }
                self.current_set = Some(name);
            },
            None => {
                let variable_name = fields[0];
                let id = self.problem.variable_id(variable_name)
                    .ok_or_else(|| unknown_column(variable_name))?;

                let set_name = self.current_set.as_deref()
                    .ok_or_else(|| ParseError::new("Set member before the first set header."))?;
                match self.problem.constraint_mut(set_name) {
                    Some(Constraint::Sos(set)) => set.push(id),
                    _ => return Err(InconsistencyError::new(
                        format!("Set \"{}\" was replaced by another constraint.", set_name),
                    ).into()),
                }
            },
        }

        Ok(())
    }

    fn read_indicator(&mut self, fields: &[&str]) -> Result<(), Import> {
        let [indicator, row_name, variable_name, value_text] = required(fields)?;
        if indicator != INDICATOR {
            return Err(ParseError::new(
                format!("Expected \"{}\" at the start of the line, found \"{}\".", INDICATOR, indicator),
            ).into());
        }

        let trigger_value = match parse_value(value_text)? {
            value if value == 0 => false,
            value if value == 1 => true,
            value => return Err(ParseError::new(
                format!("Indicator value should be 0 or 1, found {}.", value),
            ).into()),
        };

        let trigger = self.problem.variable_id(variable_name)
            .ok_or_else(|| unknown_column(variable_name))?;
        let consequent = self.problem.remove_constraint(row_name)
            .ok_or_else(|| unknown_row(row_name))?;
        let name = consequent.name().to_string();

        self.problem.add_constraint(IndicatorConstraint::new(name, trigger, trigger_value, consequent));

        Ok(())
    }

    fn is_objective(&self, row_name: &str) -> bool {
        self.problem.objective_name.as_deref() == Some(row_name)
    }
}

/// Change the domain of a variable according to a bound.
///
/// A binary variable that gets a bound other than a lower bound of zero or an upper bound of one
/// becomes an integer variable without upper bound first.
fn apply_bound(variable: &mut Variable, bound_type: BoundType, value: Rational) {
    let integer_bound = matches!(bound_type, BoundType::LowerInteger | BoundType::UpperInteger);
    if variable.variable_type == VariableType::Binary
        && (integer_bound || !bound_type.keeps_binary(&value)) {
        variable.variable_type = VariableType::Integer;
        variable.upper_bound = None;
    }

    match bound_type {
        BoundType::LowerContinuous => variable.lower_bound = Some(value),
        BoundType::UpperContinuous => variable.upper_bound = Some(value),
        BoundType::Fixed => {
            variable.lower_bound = Some(value.clone());
            variable.upper_bound = Some(value);
        },
        BoundType::Free => {
            variable.lower_bound = None;
            variable.upper_bound = None;
        },
        BoundType::LowerMinusInfinity => variable.lower_bound = None,
        BoundType::UpperInfinity => variable.upper_bound = None,
        BoundType::Binary => {
            variable.variable_type = VariableType::Binary;
            let zero = Rational::from(0);
            let one = Rational::from(1);
            variable.lower_bound = Some(variable.lower_bound.take().map_or(zero.clone(), |lower| lower.max(zero)));
            variable.upper_bound = Some(variable.upper_bound.take().map_or(one.clone(), |upper| upper.min(one)));
        },
        BoundType::LowerInteger => {
            variable.variable_type = VariableType::Integer;
            variable.lower_bound = Some(value);
        },
        BoundType::UpperInteger => {
            variable.variable_type = VariableType::Integer;
            variable.upper_bound = Some(value);
        },
        BoundType::SemiContinuous => {
            // the domain is {0} together with [1, ub]
            variable.variable_type = VariableType::SemiContinuous;
            variable.lower_bound = Some(Rational::from(1));
            variable.upper_bound = Some(value);
        },
    }
}

fn parse_objective(text: &str) -> ParseResult<Objective> {
    if text.starts_with("MIN") {
        Ok(Objective::Minimize)
    } else if text.starts_with("MAX") {
        Ok(Objective::Maximize)
    } else {
        Err(ParseError::new(format!("Can't read objective direction \"{}\".", text)))
    }
}

fn parse_value(text: &str) -> ParseResult<Rational> {
    Rational::from_str(text)
        .map_err(|error| ParseError::wrap_other(error, format!("Couldn't parse value \"{}\".", text)))
}

/// The first `N` fields, or an error if there are fewer.
fn required<'a, const N: usize>(fields: &[&'a str]) -> ParseResult<[&'a str; N]> {
    fields.get(..N)
        .and_then(|fields| <[&str; N]>::try_from(fields).ok())
        .ok_or_else(|| ParseError::new(format!("Expected at least {} fields, found {}.", N, fields.len())))
}

/// Insert a set name if a line in the RHS or RANGES section has none.
///
/// Without a set name, such a line has an even number of fields.
fn with_set_name<'a>(fields: &[&'a str], default: &'a str) -> Vec<&'a str> {
    let mut fields = fields.to_vec();
    if fields.len() % 2 == 0 {
        fields.insert(0, default);
    }

    fields
}

/// The one or two `(row name, value)` pairs following the set name.
fn pairs<'a>(fields: &[&'a str]) -> ParseResult<Vec<[&'a str; 2]>> {
    match fields {
        &[_, row, value] => Ok(vec![[row, value]]),
        &[_, row, value, second_row, second_value] => Ok(vec![[row, value], [second_row, second_value]]),
        _ => Err(ParseError::new(format!("Expected a set name and one or two pairs, found {} fields.", fields.len()))),
    }
}

fn unknown_row(name: &str) -> Import {
    InconsistencyError::new(format!("Row \"{}\" not known.", name)).into()
}

fn unknown_column(name: &str) -> Import {
    InconsistencyError::new(format!("Column \"{}\" not known.", name)).into()
}

/// Attach the line at which a parse error occurred.
fn locate(error: Import, line: &Line) -> Import {
    match error {
        Import::Parse(error) => error.located(line.location()).into(),
        Import::Inconsistency(error) => InconsistencyError::new(
            format!("{} (line {}: \"{}\")", error.description(), line.number, line.text),
        ).into(),
        other => other,
    }
}
