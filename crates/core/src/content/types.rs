//! Loaded content records.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::eval::{self, EvalError, Operation};
use crate::frontmatter::Frontmatter;
use crate::namespace::Namespace;

/// Variables keyed by `variable_name`, in load order.
pub type VariableSet = IndexMap<String, Variable>;

/// An input variable loaded from a Markdown file whose front matter has a
/// `variable_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// All front matter fields as written, `variable_name` included.
    pub frontmatter: Frontmatter,
    /// Body text after the front matter.
    pub content: String,
    /// Directory category; empty for root-level files.
    pub category: String,
    pub path: PathBuf,
}

impl Variable {
    /// Raw `value` field; see [`crate::namespace::coerce_value`].
    pub fn value(&self) -> Option<&Value> {
        self.frontmatter.get("value")
    }

    pub fn units(&self) -> Option<String> {
        self.frontmatter.text("units")
    }

    pub fn display_units(&self) -> Option<String> {
        self.frontmatter.text("display_units")
    }

    pub fn scale(&self) -> Option<&Value> {
        self.frontmatter.get("scale")
    }

    pub fn variable_type(&self) -> Option<String> {
        self.frontmatter.text("variable_type")
    }

    pub fn nice_name(&self) -> Option<String> {
        self.frontmatter.text("nice_name")
    }

    pub fn phrase_for_card(&self) -> Option<String> {
        self.frontmatter.text("phrase_for_card")
    }

    pub fn key_assumption(&self) -> Option<String> {
        self.frontmatter.text("key_assumption")
    }

    pub fn source_url(&self) -> Option<String> {
        self.frontmatter.text("source_url")
    }

    pub fn source_notes(&self) -> Option<String> {
        self.frontmatter.text("source_notes")
    }

    /// Text shown in place of a `{name}` placeholder.
    pub fn display_name(&self) -> String {
        crate::placeholder::display_text(&self.frontmatter, &self.name)
    }

    /// The front matter with `content`, `category` and `path` injected.
    pub fn to_record(&self) -> Frontmatter {
        let mut record = self.frontmatter.clone();
        record.insert("content", Value::String(self.content.clone()));
        record.insert("category", Value::String(self.category.clone()));
        record.insert("path", Value::String(self.path.display().to_string()));
        record
    }
}

/// A calculation narrative. Scenarios have no unique key; they are
/// identified by position in their collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub frontmatter: Frontmatter,
    pub content: String,
    /// Front matter `category` if set, otherwise the directory category.
    pub category: String,
    pub path: PathBuf,
    pub filename: String,
}

impl Scenario {
    pub fn title(&self) -> Option<String> {
        self.frontmatter.text("title")
    }

    pub fn description(&self) -> Option<String> {
        self.frontmatter.text("description")
    }

    pub fn result_label(&self) -> Option<String> {
        self.frontmatter.text("result_label")
    }

    pub fn result_units(&self) -> Option<String> {
        self.frontmatter.text("result_units")
    }

    /// Names listed under `input_variables`.
    pub fn input_variables(&self) -> Vec<String> {
        match self.frontmatter.get("input_variables") {
            Some(Value::Sequence(items)) => {
                items.iter().filter_map(crate::frontmatter::scalar_to_string).collect()
            }
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The `operations` field decoded into steps; `Ok(None)` when absent.
    pub fn operations(&self) -> Result<Option<Vec<Operation>>, EvalError> {
        eval::decode_operations(self.frontmatter.get("operations"))
    }

    /// Run this scenario's operations against `ns`. Named steps stay bound
    /// in `ns` afterwards.
    pub fn compute(&self, ns: &mut Namespace) -> Option<f64> {
        eval::evaluate_value(self.frontmatter.get("operations"), ns)
    }

    /// The front matter with `content`, `category`, `path` and `filename`
    /// injected.
    pub fn to_record(&self) -> Frontmatter {
        let mut record = self.frontmatter.clone();
        record.insert("content", Value::String(self.content.clone()));
        record.insert("category", Value::String(self.category.clone()));
        record.insert("path", Value::String(self.path.display().to_string()));
        record.insert("filename", Value::String(self.filename.clone()));
        record
    }
}
