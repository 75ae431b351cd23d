use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mipcert::config::Tolerances;
use mipcert::io::{import, solution};

/// Exact certification of solutions to mixed integer linear programs.
#[derive(Parser)]
#[command(version, author = "Bram van den Heuvel <bram@vandenheuvel.online>")]
struct Opts {
    /// File containing the problem description, in the MPS format, possibly gzipped
    problem_file: PathBuf,
    /// File containing the solution, one variable name and value per line
    solution_file: PathBuf,
    /// Relative tolerance for bounds, constraints and the objective value (default 1/10000)
    #[arg(short, long)]
    linear_tolerance: Option<String>,
    /// Maximum distance of integer variables to an integer (default: the linear tolerance)
    #[arg(short, long)]
    integrality_tolerance: Option<String>,
    /// Log more, repeat for even more; `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    let tolerances = Tolerances::parse(opts.linear_tolerance.as_deref(), opts.integrality_tolerance.as_deref())
        .context("Couldn't read the tolerances")?;

    let mut problem = import(&opts.problem_file)
        .inspect_err(|_| println!("Read MPS: 0"))
        .with_context(|| format!("Couldn't read the problem file {:?}", opts.problem_file))?;
    println!("Read MPS: 1");
    println!("MIP has {} vars and {} constraints", problem.nr_variables(), problem.nr_constraints());

    let usable = solution::load(&opts.solution_file, &mut problem)
        .with_context(|| format!("Couldn't read the solution file {:?}", opts.solution_file))?;
    println!("Read SOL: {}", u8::from(usable));
    if !usable {
        return Ok(());
    }
    if problem.reported_objective.is_none() {
        println!("No objective value given");
    }
    println!();

    println!("Integrality tolerance:   {}", tolerances.integrality);
    println!("Linear tolerance:        {}", tolerances.linear);
    println!("Objective tolerance:     {}", tolerances.linear);
    println!();

    let outcome = problem.check(&tolerances);
    println!(
        "Check SOL: Integrality {} Constraints {} Objective {}",
        u8::from(outcome.integrality), u8::from(outcome.linear), u8::from(outcome.objective),
    );

    let violations = problem.max_violations();
    println!(
        "Maximum violations: Integrality {:.6} Constraints {:.6} Objective {:.6}",
        violations.integrality.to_f64(), violations.linear.to_f64(), violations.objective.to_f64(),
    );

    Ok(())
}

/// Install a subscriber writing to stderr, such that the report on stdout stays clean.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
