//! The consolidated YAML data file (`inputs` + `calculations`).

pub mod types;

pub use types::{CalculationEntry, DataFile, DataFileError, InputEntry, is_truthy};
