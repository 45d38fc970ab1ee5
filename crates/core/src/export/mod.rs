//! Markdown, CSV and JSON exports.

pub mod bundle;
pub mod csv;
pub mod markdown;

use std::path::PathBuf;

use thiserror::Error;

pub use bundle::{Bundle, BundleEntry, build_bundle};
pub use self::csv::{
    CALCULATION_COLUMNS, INPUT_COLUMNS, calculations_csv, inputs_csv, write_calculations_csv,
    write_inputs_csv,
};
pub use markdown::{calculations_markdown, inputs_markdown};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("content directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to walk directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Text of a field for export; `None` for missing and null.
pub(crate) fn cell_text(value: Option<&serde_yaml::Value>) -> Option<String> {
    use serde_yaml::Value;
    match value? {
        Value::Null => None,
        v @ (Value::Sequence(_) | Value::Mapping(_)) => serde_json::to_string(v).ok(),
        v => crate::frontmatter::scalar_to_string(v),
    }
}
