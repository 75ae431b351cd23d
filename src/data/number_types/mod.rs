//! # Number types
//!
//! Certification happens without any rounding, so there is a single number type: an arbitrary
//! precision rational.
pub mod rational;
