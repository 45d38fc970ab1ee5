//! Input variable validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use super::errors::{ValidationError, ValidationReport};
use crate::content::VariableSet;
use crate::data::{DataFile, InputEntry, is_truthy};

/// Human-readable form of the variable naming rule.
pub const NAMING_CONVENTION: &str = "description__entity__units";

const MANDATORY_FIELDS: [&str; 7] =
    ["variable", "variable_type", "entity", "units", "value", "scale", "display_units"];

const PLACEHOLDER_SOURCE: &str = "source needed";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)__(\w+)__(\w+)$").expect("valid regex"));

/// Split a variable name into its `(description, entity, units)` segments.
pub fn check_variable_name(name: &str) -> Option<(&str, &str, &str)> {
    let caps = NAME_RE.captures(name)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str()))
}

/// Validate every entry of the data file's `inputs` section.
pub fn validate_inputs(data: &DataFile) -> ValidationReport {
    let mut report = ValidationReport::new();
    for entry in data.inputs() {
        validate_entry(entry, &mut report);
    }
    tracing::debug!("validated {} inputs, {} problems", data.inputs().len(), report.errors.len());
    report
}

/// Apply the naming convention to Markdown variables. `entity` and `units`
/// are compared with the name only when the front matter sets them.
pub fn validate_variable_records(variables: &VariableSet) -> ValidationReport {
    let mut report = ValidationReport::new();
    for var in variables.values() {
        let entry = InputEntry { fields: var.frontmatter.fields.clone() };
        check_name(&var.name, &entry, false, &mut report);
    }
    report
}

fn validate_entry(entry: &InputEntry, report: &mut ValidationReport) {
    let shown = entry.variable().unwrap_or_else(|| "unknown".to_string());
    for field in MANDATORY_FIELDS {
        if !entry.has(field) {
            report.add_error(ValidationError::MissingField { field, variable: shown.clone() });
        }
    }

    let name = entry.variable().unwrap_or_default();
    check_name(&name, entry, true, report);

    if is_invalid_value(entry.get("value")) {
        report.add_error(ValidationError::InvalidValue(name.clone()));
    }
    if is_null(entry.get("scale")) || is_null(entry.get("display_units")) {
        report.add_error(ValidationError::MissingScaleOrDisplayUnits(name.clone()));
    }

    if !entry.get("key_assumption").is_some_and(is_truthy) {
        report.add_error(ValidationError::MissingKeyAssumption(name.clone()));
    }
    let source_ok = entry
        .get("source_url")
        .is_some_and(|v| is_truthy(v) && v.as_str() != Some(PLACEHOLDER_SOURCE));
    if !source_ok {
        report.add_error(ValidationError::MissingSourceUrl(name));
    }
}

/// Name must split into `description__entity__units` whose entity and units
/// segments equal the record's fields. With `required` unset, absent fields
/// are not compared.
fn check_name(name: &str, entry: &InputEntry, required: bool, report: &mut ValidationReport) {
    let Some((_, entity, units)) = check_variable_name(name) else {
        report.add_error(ValidationError::BadName(name.to_string()));
        return;
    };
    if (required || entry.has("entity")) && !field_equals(entry, "entity", entity) {
        report.add_error(ValidationError::EntityMismatch {
            variable: name.to_string(),
            expected: entity.to_string(),
            actual: shown_value(entry.get("entity")),
        });
    }
    if (required || entry.has("units")) && !field_equals(entry, "units", units) {
        report.add_error(ValidationError::UnitsMismatch {
            variable: name.to_string(),
            expected: units.to_string(),
            actual: shown_value(entry.get("units")),
        });
    }
}

fn field_equals(entry: &InputEntry, key: &str, expected: &str) -> bool {
    entry.get(key).and_then(Value::as_str) == Some(expected)
}

fn shown_value(value: Option<&Value>) -> String {
    value.and_then(crate::frontmatter::scalar_to_string).unwrap_or_else(|| "None".to_string())
}

fn is_null(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn is_invalid_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty() || s == ".nan",
        Some(Value::Number(n)) => n.as_f64().is_some_and(f64::is_nan),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r"
inputs:
  - variable: users__world__count
    variable_type: population
    entity: world
    units: count
    value: 8000000000
    scale: 1000000000
    display_units: billion people
    key_assumption: Everyone counts once
    source_url: https://example.org/population
";

    #[test]
    fn valid_entry_passes() {
        let report = validate_inputs(&DataFile::from_yaml(VALID).unwrap());
        assert!(report.is_valid(), "{:?}", report.messages());
    }

    #[test]
    fn splits_name_greedily() {
        assert_eq!(check_variable_name("a__b__c"), Some(("a", "b", "c")));
        assert_eq!(check_variable_name("gdp_per__capita__us__usd"), Some(("gdp_per__capita", "us", "usd")));
        assert_eq!(check_variable_name("plain"), None);
        assert_eq!(check_variable_name("a__b-c__d"), None);
    }

    #[test]
    fn reports_every_problem() {
        let data = DataFile::from_yaml(
            r"
inputs:
  - variable: price__coffee__usd
    entity: tea
    units: usd
    value: ''
    display_units: dollars
    source_url: source needed
",
        )
        .unwrap();
        let messages = validate_inputs(&data).messages();
        assert_eq!(
            messages,
            vec![
                "Missing mandatory field 'variable_type' in variable 'price__coffee__usd'",
                "Missing mandatory field 'scale' in variable 'price__coffee__usd'",
                "Entity mismatch in variable 'price__coffee__usd': expected 'coffee', got 'tea'.",
                "Invalid or missing value for variable 'price__coffee__usd'.",
                "Missing 'scale' or 'display_units' for variable 'price__coffee__usd'.",
                "Missing key assumption for variable 'price__coffee__usd'.",
                "Missing or placeholder source URL for variable 'price__coffee__usd'.",
            ]
        );
    }

    #[test]
    fn bad_name_and_unknown_variable() {
        let data = DataFile::from_yaml("inputs:\n  - value: 1\n").unwrap();
        let messages = validate_inputs(&data).messages();
        assert!(messages.contains(&"Missing mandatory field 'variable' in variable 'unknown'".to_string()));
        assert!(messages.contains(
            &"Variable name '' does not match the naming convention 'description__entity__units'."
                .to_string()
        ));
    }

    fn markdown_variable(name: &str, extra: &str) -> crate::content::Variable {
        let doc = crate::frontmatter::parse(&format!("---\nvariable_name: {name}\nvalue: 2000\n{extra}---\n"));
        crate::content::Variable {
            name: name.to_string(),
            frontmatter: doc.frontmatter,
            content: doc.body,
            category: String::new(),
            path: std::path::PathBuf::from(format!("{name}.md")),
        }
    }

    #[test]
    fn markdown_records_only_check_naming() {
        let mut vars = VariableSet::new();
        vars.insert("users__app__count".into(), markdown_variable("users__app__count", ""));
        assert!(validate_variable_records(&vars).is_valid());

        vars.insert("revenue".into(), markdown_variable("revenue", ""));
        vars.insert(
            "price__app__usd".into(),
            markdown_variable("price__app__usd", "entity: app\nunits: eur\n"),
        );
        assert_eq!(
            validate_variable_records(&vars).messages(),
            vec![
                "Variable name 'revenue' does not match the naming convention 'description__entity__units'.",
                "Units mismatch in variable 'price__app__usd': expected 'usd', got 'eur'.",
            ]
        );
    }

    #[test]
    fn nan_string_value_is_invalid() {
        let yaml = VALID.replace("value: 8000000000", "value: '.nan'");
        let report = validate_inputs(&DataFile::from_yaml(&yaml).unwrap());
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidValue("users__world__count".into())]
        );
    }
}
