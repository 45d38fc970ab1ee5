//! `napkin export`: Markdown and CSV renderings of the data file.

use std::fs;
use std::path::Path;

use napkin_core::data::DataFile;
use napkin_core::export::{
    calculations_markdown, inputs_markdown, write_calculations_csv, write_inputs_csv,
};

use crate::OutArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: OutArgs) {
    let rc = super::load_config(config, profile);
    let out_dir = args.out.unwrap_or(rc.output_dir);

    let data = match DataFile::load(&rc.data_file) {
        Ok(data) => data,
        Err(e) => super::fail(e),
    };

    if let Err(e) = fs::create_dir_all(&out_dir) {
        super::fail(format!("creating {}: {e}", out_dir.display()));
    }

    for (name, text) in [
        ("inputs.md", inputs_markdown(&data)),
        ("calculations.md", calculations_markdown(&data)),
    ] {
        let path = out_dir.join(name);
        if let Err(e) = fs::write(&path, text) {
            super::fail(format!("writing {}: {e}", path.display()));
        }
        println!("wrote {}", path.display());
    }

    let inputs_csv = out_dir.join("inputs.csv");
    if let Err(e) = write_inputs_csv(&data, &inputs_csv) {
        super::fail(e);
    }
    println!("wrote {}", inputs_csv.display());

    let calculations_csv = out_dir.join("calculations.csv");
    if let Err(e) = write_calculations_csv(&data, &calculations_csv) {
        super::fail(e);
    }
    println!("wrote {}", calculations_csv.display());
}
