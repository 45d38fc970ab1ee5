use napkin_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;

fn status(path: &Path) -> &'static str {
    if path.exists() { "ok" } else { "missing" }
}

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   napkin doctor ({})", napkin_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("data_root: {}", rc.data_root.display());
            println!("inputs_dir: {} ({})", rc.inputs_dir.display(), status(&rc.inputs_dir));
            println!(
                "scenarios_dir: {} ({})",
                rc.scenarios_dir.display(),
                status(&rc.scenarios_dir)
            );
            println!("data_file: {} ({})", rc.data_file.display(), status(&rc.data_file));
            println!("output_dir: {}", rc.output_dir.display());
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
            println!("display.precision: {}", rc.display.precision);
        }
        Err(e) => {
            println!("FAIL napkin doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
