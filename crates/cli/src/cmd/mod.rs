pub mod build;
pub mod doctor;
pub mod export;
pub mod inputs;
pub mod output;
pub mod scenarios;
pub mod validate;

use std::path::Path;

use napkin_core::config::loader::ConfigLoader;
use napkin_core::config::types::ResolvedConfig;

/// Load configuration and start logging, exiting on failure.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);
    rc
}

/// Print `msg` to stderr and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    crate::logging::flush();
    std::process::exit(1);
}
