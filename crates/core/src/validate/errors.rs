//! Validation problems and the aggregated report.

use serde::Serialize;
use thiserror::Error;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing mandatory field '{field}' in variable '{variable}'")]
    MissingField { field: &'static str, variable: String },

    #[error(
        "Variable name '{0}' does not match the naming convention 'description__entity__units'."
    )]
    BadName(String),

    #[error("Entity mismatch in variable '{variable}': expected '{expected}', got '{actual}'.")]
    EntityMismatch { variable: String, expected: String, actual: String },

    #[error("Units mismatch in variable '{variable}': expected '{expected}', got '{actual}'.")]
    UnitsMismatch { variable: String, expected: String, actual: String },

    #[error("Invalid or missing value for variable '{0}'.")]
    InvalidValue(String),

    #[error("Missing 'scale' or 'display_units' for variable '{0}'.")]
    MissingScaleOrDisplayUnits(String),

    #[error("Missing key assumption for variable '{0}'.")]
    MissingKeyAssumption(String),

    #[error("Missing or placeholder source URL for variable '{0}'.")]
    MissingSourceUrl(String),

    #[error("Invalid YAML structure. Expected \"inputs\" and \"calculations\" fields as lists.")]
    InvalidStructure,

    #[error("Invalid input entry: {0}")]
    InvalidInputEntry(String),

    #[error("Invalid calculation entry: {0}")]
    InvalidCalculationEntry(String),

    #[error("Missing input value for key: {key} in calculation: {title}")]
    MissingInputValue { key: String, title: String },

    #[error("Error evaluating calculation '{title}': {reason}")]
    EvaluationFailed { title: String, reason: String },
}

/// A calculation whose explanation evaluated successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedCalculation {
    pub title: String,
    pub value: f64,
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Problems found, in discovery order.
    pub errors: Vec<ValidationError>,
    /// Calculations that evaluated cleanly.
    pub evaluated: Vec<EvaluatedCalculation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.evaluated.extend(other.evaluated);
    }

    /// Error messages as displayed to users.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
