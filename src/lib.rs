//! # Certification of mixed integer linear program solutions
//!
//! A problem is read from a file in the MPS format, a candidate solution is loaded into it, and
//! the solution is checked for feasibility and for the objective value that the solver reported.
//! All arithmetic is exact: numbers are read from their decimal representation into arbitrary
//! precision rationals, such that the only inexactness is that of the tolerances.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mipcert::config::Tolerances;
//! use mipcert::io::{import, solution};
//!
//! let mut problem = import(Path::new("model.mps.gz"))?;
//! if solution::load(Path::new("model.sol"), &mut problem)? {
//!     let outcome = problem.check(&Tolerances::default());
//!     println!("{:?}", outcome);
//! }
//! # Ok::<(), mipcert::io::error::Import>(())
//! ```
#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod io;
