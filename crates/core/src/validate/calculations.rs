//! Calculation validation: structure, input references, and evaluation of
//! each explanation expression.

use indexmap::IndexMap;
use serde_yaml::Value;

use super::errors::{EvaluatedCalculation, ValidationError, ValidationReport};
use crate::data::{DataFile, InputEntry};
use crate::eval::evaluate_expression;
use crate::namespace::{Namespace, coerce_value};

/// Check every calculation and evaluate the ones whose inputs resolve.
pub fn validate_calculations(data: &DataFile) -> ValidationReport {
    let mut report = ValidationReport::new();

    let (Some(inputs), Some(calculations)) = (&data.inputs, &data.calculations) else {
        report.add_error(ValidationError::InvalidStructure);
        return report;
    };

    let mut by_name: IndexMap<String, &InputEntry> = IndexMap::new();
    for input in inputs {
        match input.variable() {
            Some(name) if input.has("value") => {
                by_name.insert(name, input);
            }
            other => report.add_error(ValidationError::InvalidInputEntry(
                other.unwrap_or_else(|| "Unknown Variable".to_string()),
            )),
        }
    }

    for calc in calculations {
        let title = calc.title();
        let (Some(title), Some(explanation), Some(keys)) =
            (title.clone(), calc.explanation(), calc.input_names())
        else {
            report.add_error(ValidationError::InvalidCalculationEntry(
                title.unwrap_or_else(|| "Unknown Title".to_string()),
            ));
            continue;
        };

        let mut vars = Namespace::new();
        let mut complete = true;
        for key in keys {
            let value = by_name.get(&key).and_then(|input| input.get("value"));
            match value {
                None | Some(Value::Null) => {
                    report.add_error(ValidationError::MissingInputValue {
                        key: key.clone(),
                        title: title.clone(),
                    });
                    complete = false;
                }
                Some(v) => match coerce_value(Some(v)) {
                    Ok(n) => vars.set(key, n),
                    Err(e) => {
                        report.add_error(ValidationError::EvaluationFailed {
                            title: title.clone(),
                            reason: format!("input '{key}': {e}"),
                        });
                        complete = false;
                    }
                },
            }
        }
        if !complete {
            continue;
        }

        match evaluate_expression(&explanation, &vars) {
            Ok(value) => {
                tracing::debug!("calculation \"{title}\" evaluated to {value}");
                report.evaluated.push(EvaluatedCalculation { title, value });
            }
            Err(e) => report.add_error(ValidationError::EvaluationFailed {
                title,
                reason: e.to_string(),
            }),
        }
    }

    report
}
