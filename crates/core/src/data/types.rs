//! Consolidated data file types.
//!
//! Entries keep their raw YAML fields so validators can tell a missing field
//! from an empty one:
//! ```yaml
//! inputs:
//!   - variable: users__world__count
//!     value: 8000000000
//!     units: count
//! calculations:
//!   - title: Revenue if everyone paid
//!     inputs: [users__world__count, price__subscription__usd]
//!     explanation: users__world__count * price__subscription__usd
//!     result: { label: Revenue, units: usd }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

use crate::frontmatter::scalar_to_string;

#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("failed to read data file {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("data file must be a mapping at the top level")]
    NotAMapping,
}

/// Loaded data file. A section is `None` when it is missing or not a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFile {
    pub inputs: Option<Vec<InputEntry>>,
    pub calculations: Option<Vec<CalculationEntry>>,
}

impl DataFile {
    pub fn load(path: &Path) -> Result<Self, DataFileError> {
        let s = fs::read_to_string(path).map_err(|e| DataFileError::Read(path.to_path_buf(), e))?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> Result<Self, DataFileError> {
        let top: Value = serde_yaml::from_str(s)?;
        let map = match top {
            Value::Mapping(m) => m,
            Value::Null => return Ok(Self::default()),
            _ => return Err(DataFileError::NotAMapping),
        };

        let section = |key: &str| match map.get(key) {
            Some(Value::Sequence(items)) => Some(items.iter().map(fields_of).collect::<Vec<_>>()),
            _ => None,
        };

        Ok(Self {
            inputs: section("inputs").map(|v| v.into_iter().map(|fields| InputEntry { fields }).collect()),
            calculations: section("calculations")
                .map(|v| v.into_iter().map(|fields| CalculationEntry { fields }).collect()),
        })
    }

    /// Inputs, or an empty slice when the section is missing.
    pub fn inputs(&self) -> &[InputEntry] {
        self.inputs.as_deref().unwrap_or_default()
    }

    /// Calculations, or an empty slice when the section is missing.
    pub fn calculations(&self) -> &[CalculationEntry] {
        self.calculations.as_deref().unwrap_or_default()
    }
}

/// Entries that are not mappings load with no fields.
fn fields_of(item: &Value) -> BTreeMap<String, Value> {
    let Value::Mapping(m) = item else {
        return BTreeMap::new();
    };
    m.iter()
        .filter_map(|(k, v)| scalar_to_string(k).map(|k| (k, v.clone())))
        .collect()
}

/// Python-style truthiness: null, `false`, zero, and empty strings or
/// collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(s) => !s.is_empty(),
        Value::Mapping(m) => !m.is_empty(),
        Value::Tagged(t) => is_truthy(&t.value),
    }
}

/// An entry of the `inputs` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputEntry {
    pub fields: BTreeMap<String, Value>,
}

impl InputEntry {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_to_string)
    }

    pub fn variable(&self) -> Option<String> {
        self.text("variable")
    }
}

/// An entry of the `calculations` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationEntry {
    pub fields: BTreeMap<String, Value>,
}

impl CalculationEntry {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_to_string)
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn explanation(&self) -> Option<String> {
        self.text("explanation")
    }

    /// Referenced input names; `None` unless `inputs` is a list.
    pub fn input_names(&self) -> Option<Vec<String>> {
        match self.fields.get("inputs") {
            Some(Value::Sequence(items)) => {
                Some(items.iter().map(|v| scalar_to_string(v).unwrap_or_default()).collect())
            }
            _ => None,
        }
    }

    /// A field of the nested `result` mapping.
    pub fn result_field(&self, key: &str) -> Option<&Value> {
        match self.fields.get("result") {
            Some(Value::Mapping(m)) => m.get(key),
            _ => None,
        }
    }
}
