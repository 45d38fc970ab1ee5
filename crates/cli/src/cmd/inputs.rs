//! `napkin inputs`: list input variables.

use std::path::Path;

use napkin_core::content::{inputs_by_type, load_variables, Variable};

use super::output::{print_json, print_table, InputOutput, InputRow};
use crate::InputsArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: InputsArgs) {
    let rc = super::load_config(config, profile);
    let variables = load_variables(&rc.inputs_dir);

    let selected: Vec<&Variable> = match args.variable_type {
        Some(ref t) => inputs_by_type(&variables).swap_remove(t).unwrap_or_default(),
        None => variables.values().collect(),
    };

    if args.json {
        let out: Vec<InputOutput> = selected.iter().map(|&v| InputOutput::from(v)).collect();
        print_json(&out);
    } else {
        let rows: Vec<InputRow> =
            selected.iter().map(|v| InputRow::new(v, rc.display.precision)).collect();
        print_table(&rows, "(no inputs found)");
        if !rows.is_empty() {
            println!("\nTotal: {} inputs", rows.len());
        }
    }
}
