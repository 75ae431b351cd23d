use std::fs;
use std::process::Command;

use tempfile::tempdir;

use mipcert::config::Tolerances;
use mipcert::data::problem::{CheckOutcome, Objective, Problem};
use mipcert::data::problem::constraint::{Constraint, ConstraintRelation};
use mipcert::data::problem::variable::VariableType;
use mipcert::io::{import, solution};
use mipcert::io::error::Import;
use mipcert::R;

use super::{get_test_file_path, write, write_compressed};

fn certify() -> Problem {
    import(&get_test_file_path("certify.mps")).unwrap()
}

/// The reference solution with some values replaced.
fn solution_text(replacements: &[(&str, &str)]) -> String {
    let text = fs::read_to_string(get_test_file_path("certify.sol")).unwrap();
    text.lines()
        .map(|line| {
            let name = line.split_whitespace().next().unwrap_or_default();
            match replacements.iter().find(|(replaced, _)| *replaced == name) {
                Some((name, value)) => format!("{} {}\n", name, value),
                None => format!("{}\n", line),
            }
        })
        .collect()
}

/// Load a solution into the problem from a temporary file.
fn load(problem: &mut Problem, text: &str) -> bool {
    let directory = tempdir().unwrap();
    let path = write(&directory, "candidate.sol", text);
    solution::load(&path, problem).unwrap()
}

#[test]
fn read_problem() {
    let problem = certify();

    assert_eq!(problem.name, "CERTIFY");
    assert_eq!(problem.objective, Objective::Minimize);
    assert_eq!(problem.objective_constant, R!(2, 1));
    assert_eq!(problem.nr_variables(), 4);
    assert_eq!(problem.nr_constraints(), 5);

    let types = problem.variables()
        .map(|variable| (variable.name.as_str(), variable.variable_type))
        .collect::<Vec<_>>();
    assert_eq!(types, vec![
        ("FLOW", VariableType::Continuous),
        ("ITEMS", VariableType::Integer),
        ("OPEN", VariableType::Binary),
        ("SPARE", VariableType::Continuous),
    ]);

    match problem.constraint("CAP") {
        Some(Constraint::Linear(constraint)) => {
            assert_eq!(constraint.relation(), ConstraintRelation::Ranged);
            assert_eq!((constraint.lhs.clone(), constraint.rhs.clone()), (Some(R!(15, 1)), Some(R!(20, 1))));
        },
        other => panic!("expected a linear constraint, found {:?}", other),
    }
    assert!(matches!(problem.constraint("SWITCH"), Some(Constraint::Indicator(_))));
    assert!(matches!(problem.constraint("PICK"), Some(Constraint::Sos(_))));
}

#[test]
fn feasible() {
    let mut problem = certify();
    assert!(solution::load(&get_test_file_path("certify.sol"), &mut problem).unwrap());

    assert_eq!(problem.reported_objective, Some(R!(26, 1)));
    assert_eq!(problem.objective_value(), R!(26, 1));
    assert_eq!(
        problem.check(&Tolerances::default()),
        CheckOutcome { integrality: true, linear: true, objective: true },
    );

    let violations = problem.max_violations();
    assert_eq!(violations.integrality, R!(0, 1));
    assert_eq!(violations.linear, R!(0, 1));
    assert_eq!(violations.objective, R!(0, 1));
}

#[test]
fn fractional_integer() {
    let mut problem = certify();
    assert!(load(&mut problem, &solution_text(&[("ITEMS", "7.5"), ("=obj=", "24.5")])));

    assert_eq!(
        problem.check(&Tolerances::default()),
        CheckOutcome { integrality: false, linear: true, objective: true },
    );
    assert_eq!(problem.max_violations().integrality, R!(1, 2));
}

#[test]
fn tolerance_decides() {
    let mut problem = certify();
    assert!(load(&mut problem, &solution_text(&[("FLOW", "0.00001")])));

    assert_eq!(
        problem.check(&Tolerances::default()),
        CheckOutcome { integrality: true, linear: true, objective: true },
    );
    assert_eq!(
        problem.check(&Tolerances::new(R!(1, 1_000_000))),
        CheckOutcome { integrality: true, linear: false, objective: true },
    );

    let violations = problem.max_violations();
    assert_eq!(violations.linear, R!(1, 100_000));
    assert_eq!(violations.objective, R!(3, 200_000));
}

#[test]
fn indicator_and_set() {
    // the indicator is active and violated, the set is violated too
    let mut problem = certify();
    let text = solution_text(&[("FLOW", "2.5"), ("SPARE", "2"), ("=obj=", "29.75")]);
    assert!(load(&mut problem, &text));
    assert_eq!(
        problem.check(&Tolerances::default()),
        CheckOutcome { integrality: true, linear: false, objective: true },
    );
    assert_eq!(problem.max_violations().linear, R!(2, 1));

    // the indicator is inactive, the set violation has no size
    let mut problem = certify();
    let text = solution_text(&[("FLOW", "2.5"), ("SPARE", "2"), ("OPEN", "1"), ("=obj=", "39.75")]);
    assert!(load(&mut problem, &text));
    assert_eq!(
        problem.check(&Tolerances::default()),
        CheckOutcome { integrality: true, linear: false, objective: true },
    );
    assert_eq!(problem.max_violations().linear, R!(0, 1));
}

#[test]
fn objective_value() {
    let mut problem = certify();
    assert!(load(&mut problem, &solution_text(&[("=obj=", "27")])));
    let outcome = problem.check(&Tolerances::default());
    assert!(outcome.integrality && outcome.linear && !outcome.objective);
    assert_eq!(problem.max_violations().objective, R!(1, 1));

    // without a reported value, the objective is never correct
    let mut problem = certify();
    assert!(load(&mut problem, "ITEMS 8\nSPARE -0.5\nUNKNOWN 3\n"));
    assert_eq!(problem.reported_objective, None);
    assert!(!problem.check(&Tolerances::default()).objective);
    assert_eq!(problem.max_violations().objective, R!(0, 1));
}

#[test]
fn not_usable() {
    let mut problem = certify();
    assert!(!load(&mut problem, "=infeas=\n"));
    assert!(!load(&mut problem, "=obj= 26\nUNKNOWN 1\n"));

    let directory = tempdir().unwrap();
    let path = write(&directory, "broken.sol", "ITEMS eight\n");
    assert!(matches!(solution::load(&path, &mut problem), Err(Import::Parse(_))));
    assert!(matches!(
        solution::load(&directory.path().join("missing.sol"), &mut problem),
        Err(Import::Io(_)),
    ));
}

#[test]
fn compressed() {
    let directory = tempdir().unwrap();
    let problem_text = fs::read_to_string(get_test_file_path("certify.mps")).unwrap();
    let path = write_compressed(&directory, "certify.mps.gz", &problem_text);

    let mut compressed = import(&path).unwrap();
    let plain = certify();
    assert_eq!(compressed.variables().collect::<Vec<_>>(), plain.variables().collect::<Vec<_>>());
    assert_eq!(compressed.constraints().collect::<Vec<_>>(), plain.constraints().collect::<Vec<_>>());

    let path = write_compressed(&directory, "certify.sol.gz", &solution_text(&[]));
    assert!(solution::load(&path, &mut compressed).unwrap());
    assert!(compressed.check(&Tolerances::default()).linear);
}

#[test]
fn file_extensions() {
    let directory = tempdir().unwrap();
    let problem_text = fs::read_to_string(get_test_file_path("certify.mps")).unwrap();

    for name in ["certify.MPS", "certify.SIF"] {
        let path = write(&directory, name, &problem_text);
        assert_eq!(import(&path).unwrap().nr_constraints(), 5);
    }
    for name in ["certify.lp", "certify.lp.gz", "certify"] {
        let path = write(&directory, name, &problem_text);
        assert!(matches!(import(&path), Err(Import::FileExtension(_))));
    }
}

#[test]
fn driver() {
    let run = |problem: &std::path::Path| Command::new(env!("CARGO_BIN_EXE_mipcert"))
        .arg(problem)
        .arg(get_test_file_path("certify.sol"))
        .output()
        .unwrap();

    let output = run(&get_test_file_path("certify.mps"));
    let report = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(report.contains("Read MPS: 1"));
    assert!(report.contains("Check SOL: Integrality 1 Constraints 1 Objective 1"));

    let directory = tempdir().unwrap();
    let broken = write(&directory, "broken.mps", "NAME broken\nROWS\n N obj\n");
    let output = run(&broken);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Read MPS: 0"));
}
