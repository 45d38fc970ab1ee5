//! `napkin scenarios`: compute scenarios against the loaded inputs.

use std::path::Path;

use napkin_core::content::query::ALL_CATEGORIES;
use napkin_core::content::{filter_by_category, load_scenarios, load_variables, unique_categories};
use napkin_core::format::format_number;
use napkin_core::namespace::build_namespace;
use napkin_core::placeholder::{substitute, substitute_opt};

use super::output::{print_json, print_table, ScenarioOutput, ScenarioRow};
use crate::ScenariosArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ScenariosArgs) {
    let rc = super::load_config(config, profile);
    let variables = load_variables(&rc.inputs_dir);
    let scenarios = load_scenarios(&rc.scenarios_dir);

    let mut ns = build_namespace(&variables);
    for (name, value) in &args.overrides {
        if !ns.contains(name) {
            tracing::warn!("--set {name}: no such input variable, binding it anyway");
        }
        ns.set(name.clone(), *value);
    }

    let category = args.category.as_deref().unwrap_or(ALL_CATEGORIES);
    if category != ALL_CATEGORIES && !unique_categories(&scenarios).iter().any(|c| c == category) {
        tracing::warn!("no scenarios in category '{category}'");
    }

    let results: Vec<ScenarioOutput> = filter_by_category(&scenarios, category)
        .into_iter()
        .map(|scenario| {
            let result = scenario.compute(&mut ns);
            let title = scenario.title().unwrap_or_else(|| scenario.filename.clone());
            let description = scenario.description();
            ScenarioOutput {
                title: substitute(&title, &variables).into_owned(),
                description: substitute_opt(description.as_deref(), &variables)
                    .map(|d| d.into_owned()),
                category: scenario.category.clone(),
                result_label: scenario.result_label(),
                result,
                formatted: format_number(result, rc.display.precision),
                result_units: scenario.result_units(),
            }
        })
        .collect();

    if args.json {
        print_json(&results);
    } else {
        let rows: Vec<ScenarioRow> = results.iter().map(ScenarioRow::from).collect();
        print_table(&rows, "(no scenarios found)");
    }
}
