//! `napkin build`: the combined JSON bundle of all content files.

use std::fs;
use std::path::Path;

use napkin_core::export::build_bundle;

use crate::OutArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: OutArgs) {
    let rc = super::load_config(config, profile);
    let out = args.out.unwrap_or_else(|| rc.output_dir.join("data.json"));

    let bundle = match build_bundle(&rc.inputs_dir, &rc.scenarios_dir) {
        Ok(bundle) => bundle,
        Err(e) => super::fail(e),
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            super::fail(format!("creating {}: {e}", parent.display()));
        }
    }
    if let Err(e) = bundle.write_json(&out) {
        super::fail(e);
    }

    tracing::info!(inputs = bundle.inputs.len(), scenarios = bundle.scenarios.len(), "bundle built");
    println!(
        "wrote {} ({} inputs, {} scenarios)",
        out.display(),
        bundle.inputs.len(),
        bundle.scenarios.len()
    );
}
