//! Building a namespace from loaded variables.

use serde_yaml::Value;
use thiserror::Error;

use super::types::Namespace;
use crate::content::VariableSet;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("no value")]
    Missing,

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("{0} cannot be used as a number")]
    WrongType(&'static str),
}

/// Numeric value of every variable, keyed by name.
///
/// Variables whose `value` is missing or not numeric get 0.
pub fn build_namespace(variables: &VariableSet) -> Namespace {
    variables
        .iter()
        .map(|(name, var)| (name.as_str(), coerce_value_lenient(name, var.value())))
        .collect()
}

/// Coerce a front matter value to a number.
///
/// Accepts numbers, booleans (as 1/0) and numeric strings such as
/// `" 12.5 "`, `"1e6"`, `"1_000"`, `"inf"` or `"nan"`.
pub fn coerce_value(value: Option<&Value>) -> Result<f64, CoerceError> {
    match value {
        None | Some(Value::Null) => Err(CoerceError::Missing),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| CoerceError::NotNumeric(n.to_string())),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => parse_number(s),
        Some(Value::Tagged(tagged)) => coerce_value(Some(&tagged.value)),
        Some(Value::Sequence(_)) => Err(CoerceError::WrongType("a sequence")),
        Some(Value::Mapping(_)) => Err(CoerceError::WrongType("a mapping")),
    }
}

/// [`coerce_value`] with 0 substituted on failure.
pub fn coerce_value_lenient(name: &str, value: Option<&Value>) -> f64 {
    coerce_value(value).unwrap_or_else(|e| {
        tracing::debug!("value of '{name}' defaults to 0: {e}");
        0.0
    })
}

fn parse_number(s: &str) -> Result<f64, CoerceError> {
    let trimmed = s.trim();
    let not_numeric = || CoerceError::NotNumeric(s.to_string());

    if trimmed.contains('_') {
        // Underscores are only allowed as digit separators.
        let bytes = trimmed.as_bytes();
        let well_placed = bytes.iter().enumerate().all(|(i, b)| {
            *b != b'_'
                || (i > 0
                    && i + 1 < bytes.len()
                    && bytes[i - 1].is_ascii_digit()
                    && bytes[i + 1].is_ascii_digit())
        });
        if !well_placed {
            return Err(not_numeric());
        }
        return trimmed.replace('_', "").parse().map_err(|_| not_numeric());
    }

    trimmed.parse().map_err(|_| not_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Variable;
    use rstest::rstest;
    use std::path::PathBuf;

    fn vars(entries: &[(&str, &str)]) -> VariableSet {
        entries
            .iter()
            .map(|(name, yaml)| {
                let var = Variable {
                    name: (*name).to_string(),
                    frontmatter: serde_yaml::from_str(yaml).unwrap(),
                    content: String::new(),
                    category: String::new(),
                    path: PathBuf::new(),
                };
                ((*name).to_string(), var)
            })
            .collect()
    }

    #[rstest]
    #[case("value: 5", 5.0)]
    #[case("value: 12.5", 12.5)]
    #[case("value: '12.5'", 12.5)]
    #[case("value: ' 3 '", 3.0)]
    #[case("value: '1e6'", 1_000_000.0)]
    #[case("value: '1_000'", 1000.0)]
    #[case("value: true", 1.0)]
    #[case("value: -4", -4.0)]
    fn numeric_values_pass_through(#[case] yaml: &str, #[case] expected: f64) {
        let ns = build_namespace(&vars(&[("x", yaml)]));
        assert_eq!(ns.get("x"), Some(expected));
    }

    #[rstest]
    #[case("value: lots")]
    #[case("value: ''")]
    #[case("value: null")]
    #[case("value: [1, 2]")]
    #[case("value: '1__000'")]
    #[case("value: '_1'")]
    #[case("units: count")]
    fn everything_else_defaults_to_zero(#[case] yaml: &str) {
        let ns = build_namespace(&vars(&[("x", yaml)]));
        assert_eq!(ns.get("x"), Some(0.0));
    }

    #[test]
    fn nan_string_is_numeric() {
        let v = Value::String("nan".into());
        assert!(coerce_value(Some(&v)).unwrap().is_nan());
    }

    #[test]
    fn coerce_reports_why() {
        assert_eq!(coerce_value(None), Err(CoerceError::Missing));
        assert_eq!(
            coerce_value(Some(&Value::String("abc".into()))),
            Err(CoerceError::NotNumeric("abc".into()))
        );
    }
}
