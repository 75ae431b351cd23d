//! # Storing of problems in memory
//!
//! This module provides the exact number type used throughout, and the data structures that
//! represent a mixed integer linear program together with a candidate solution.

pub mod number_types;
pub mod problem;
