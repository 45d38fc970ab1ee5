//! Shared output formatting for the listing commands.

use napkin_core::content::Variable;
use napkin_core::format::{apply_scale, format_number};
use napkin_core::namespace::coerce_value;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Variable row for table output.
#[derive(Tabled)]
pub struct InputRow {
    #[tabled(rename = "Variable")]
    pub name: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Type")]
    pub variable_type: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Units")]
    pub units: String,
}

impl InputRow {
    pub fn new(var: &Variable, precision: usize) -> Self {
        let scale = coerce_value(var.scale()).ok();
        let value = coerce_value(var.value())
            .ok()
            .map(|v| apply_scale(v, scale));
        Self {
            name: var.name.clone(),
            category: var.category.clone(),
            variable_type: var.variable_type().unwrap_or_default(),
            value: format_number(value, precision),
            units: var.display_units().or_else(|| var.units()).unwrap_or_default(),
        }
    }
}

/// Variable for JSON output.
#[derive(Debug, Serialize)]
pub struct InputOutput {
    pub variable: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub display_name: String,
}

impl From<&Variable> for InputOutput {
    fn from(var: &Variable) -> Self {
        Self {
            variable: var.name.clone(),
            category: var.category.clone(),
            variable_type: var.variable_type(),
            value: coerce_value(var.value()).ok().filter(|v| v.is_finite()),
            units: var.units(),
            display_name: var.display_name(),
        }
    }
}

/// Scenario result row for table output.
#[derive(Tabled)]
pub struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    pub title: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Result")]
    pub result: String,
    #[tabled(rename = "Units")]
    pub units: String,
}

/// Scenario result for JSON output.
#[derive(Debug, Serialize)]
pub struct ScenarioOutput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_label: Option<String>,
    pub result: Option<f64>,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_units: Option<String>,
}

impl From<&ScenarioOutput> for ScenarioRow {
    fn from(s: &ScenarioOutput) -> Self {
        Self {
            title: s.title.clone(),
            category: s.category.clone(),
            result: s.formatted.clone(),
            units: s.result_units.clone().unwrap_or_default(),
        }
    }
}

pub fn print_table<R: Tabled>(rows: &[R], empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => super::fail(format!("serializing JSON: {e}")),
    }
}
