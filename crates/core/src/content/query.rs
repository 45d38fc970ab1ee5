//! Grouping and filtering helpers over loaded content.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::types::{Scenario, Variable, VariableSet};

/// Category filter value that matches every scenario.
pub const ALL_CATEGORIES: &str = "All";

/// Sorted, distinct, non-empty scenario categories.
pub fn unique_categories(scenarios: &[Scenario]) -> Vec<String> {
    scenarios
        .iter()
        .filter(|s| !s.category.is_empty())
        .map(|s| s.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Scenarios in `category`, or all of them for [`ALL_CATEGORIES`].
pub fn filter_by_category<'a>(scenarios: &'a [Scenario], category: &str) -> Vec<&'a Scenario> {
    scenarios
        .iter()
        .filter(|s| category == ALL_CATEGORIES || s.category == category)
        .collect()
}

/// Variables grouped by `variable_type`; untyped ones go under `unknown`.
pub fn inputs_by_type(variables: &VariableSet) -> IndexMap<String, Vec<&Variable>> {
    let mut by_type: IndexMap<String, Vec<&Variable>> = IndexMap::new();
    for var in variables.values() {
        let key = var.variable_type().unwrap_or_else(|| "unknown".to_string());
        by_type.entry(key).or_default().push(var);
    }
    by_type
}
