//! # Reading solutions
//!
//! A solution file lists a value for variables of a problem, one `<name> <value>` pair per line.
//! Two special names are recognized: `=obj=` precedes the objective value that the solver reported,
//! and `=infeas=` states that the solver found no solution.
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::data::number_types::rational::Rational;
use crate::data::problem::Problem;
use crate::io::error::{Import, ParseError};
use crate::io::open;

/// Line stating that no solution was found.
const INFEASIBLE: &str = "=infeas=";
/// Name preceding the reported objective value.
const OBJECTIVE: &str = "=obj=";

/// Load the values of a solution file into the variables of a problem.
///
/// # Arguments
///
/// * `file_path`: Solution file, which may be compressed with gzip.
/// * `problem`: Problem whose variable values get overwritten.
///
/// # Return value
///
/// Whether the solution can be checked: the file doesn't declare the problem infeasible, and at
/// least one variable value was read.
///
/// # Errors
///
/// If the file can't be read, or if a line lacks a value or has a malformed value.
pub fn load(file_path: &Path, problem: &mut Problem) -> Result<bool, Import> {
    let usable = read(open(file_path)?, problem)?;

    tracing::info!(
        component = "solution",
        operation = "load",
        path = %file_path.display(),
        usable,
        "Read solution"
    );

    Ok(usable)
}

/// Read solution values line by line.
///
/// See `load`.
pub fn read(mut reader: impl BufRead, problem: &mut Problem) -> Result<bool, Import> {
    problem.reported_objective = None;

    let mut has_value = false;
    let mut nr_unknown = 0_usize;

    let mut buffer = String::new();
    let mut line_number = 0;
    loop {
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let line = buffer.replace(['\t', '\r', '\n'], " ");
        let mut words = line.split(' ').filter(|word| !word.is_empty());
        let Some(name) = words.next() else {
            continue;
        };

        if name == INFEASIBLE {
            tracing::info!(component = "solution", operation = "load", line = line_number, "Solution declared infeasible");
            return Ok(false);
        }

        let location = (line_number, buffer.trim_end_matches(['\n', '\r']));
        let value_text = words.next()
            .ok_or_else(|| ParseError::with_location(format!("No value for \"{}\".", name), location))?;
        let value = Rational::from_str(value_text)
            .map_err(|error| ParseError::wrap_other(error, format!("Couldn't parse value \"{}\".", value_text))
                .located(location))?;

        if name == OBJECTIVE {
            problem.reported_objective = Some(value);
        } else if let Some(id) = problem.variable_id(name) {
            problem.variable_mut(id).value = value;
            has_value = true;
        } else {
            nr_unknown += 1;
            tracing::warn!(component = "solution", operation = "load", variable = name, "Unexpected variable in solution file");
        }
    }

    if nr_unknown > 0 {
        tracing::warn!(component = "solution", operation = "load", count = nr_unknown, "Encountered unexpected variables");
    }

    Ok(has_value)
}

#[cfg(test)]
mod test {
    use crate::data::problem::Problem;
    use crate::data::problem::variable::{Variable, VariableType};
    use crate::io::error::Import;
    use crate::io::solution::read;
    use crate::R;

    fn problem() -> Problem {
        let mut problem = Problem::new("test");
        problem.add_variable(Variable::new("x", VariableType::Continuous));
        problem.add_variable(Variable::new("y", VariableType::Integer));
        problem
    }

    #[test]
    fn values() {
        let mut problem = problem();
        let text = "=obj=  12.5\nx\t0.1\r\n\n   \ny 3 ignored\nz 4\n";
        assert!(read(text.as_bytes(), &mut problem).unwrap());

        assert_eq!(problem.reported_objective, Some(R!(25, 2)));
        assert_eq!(problem.variable_by_name("x").unwrap().value, R!(1, 10));
        assert_eq!(problem.variable_by_name("y").unwrap().value, R!(3, 1));
    }

    #[test]
    fn infeasible() {
        let mut problem = problem();
        assert!(!read("x 1\n=infeas=\ny 3\n".as_bytes(), &mut problem).unwrap());
        assert_eq!(problem.variable_by_name("x").unwrap().value, R!(1, 1));
        assert_eq!(problem.variable_by_name("y").unwrap().value, R!(0, 1));
    }

    #[test]
    fn no_variable_values() {
        let mut problem = problem();
        assert!(!read("=obj= 3\n".as_bytes(), &mut problem).unwrap());
        assert_eq!(problem.reported_objective, Some(R!(3, 1)));

        assert!(!read("".as_bytes(), &mut problem).unwrap());
        assert_eq!(problem.reported_objective, None);
        assert!(!read("unknown 1\n".as_bytes(), &mut problem).unwrap());
    }

    #[test]
    fn malformed() {
        let mut problem = problem();
        match read("x 1\ny\n".as_bytes(), &mut problem) {
            Err(Import::Parse(error)) => assert_eq!(error.line_number(), Some(2)),
            other => panic!("expected a parse error, found {:?}", other),
        }
        match read("x 1\ny 1.5.1\n".as_bytes(), &mut problem) {
            Err(Import::Parse(error)) => assert_eq!(error.line_number(), Some(2)),
            other => panic!("expected a parse error, found {:?}", other),
        }
    }
}
