//! `napkin validate`: check the data file and the variable names of the
//! Markdown inputs.

use std::path::Path;

use napkin_core::content::load_variables;
use napkin_core::data::DataFile;
use napkin_core::validate::{
    validate_calculations, validate_inputs, validate_variable_records, ValidationReport,
};

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = super::load_config(config, profile);

    let data = match DataFile::load(&rc.data_file) {
        Ok(data) => data,
        Err(e) => super::fail(e),
    };

    let inputs = validate_inputs(&data);
    if inputs.is_valid() {
        println!("All inputs are correctly formatted.");
    } else {
        println!("Validation Errors Found:");
        for msg in inputs.messages() {
            println!("- {msg}");
        }
    }

    let calculations = validate_calculations(&data);
    for calc in &calculations.evaluated {
        println!(
            "Calculation \"{}\" evaluated successfully with result: {}",
            calc.title, calc.value
        );
    }
    if calculations.is_valid() {
        println!("All calculations evaluated successfully.");
    } else {
        for msg in calculations.messages() {
            println!("Validation error: {msg}");
        }
    }

    let records = if rc.inputs_dir.is_dir() {
        validate_variable_records(&load_variables(&rc.inputs_dir))
    } else {
        ValidationReport::new()
    };
    for msg in records.messages() {
        println!("- {msg}");
    }

    let failed = !inputs.is_valid() || !calculations.is_valid() || !records.is_valid();
    crate::logging::flush();
    if failed {
        std::process::exit(1);
    }
}
