//! Schema validation of input variables and calculations.
//!
//! Validators never stop at the first problem: every issue is collected
//! into a [`ValidationReport`].

pub mod calculations;
pub mod errors;
pub mod inputs;

pub use calculations::validate_calculations;
pub use errors::{EvaluatedCalculation, ValidationError, ValidationReport};
pub use inputs::{NAMING_CONVENTION, check_variable_name, validate_inputs, validate_variable_records};
