mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "napkin", version, about = "Napkin-math inputs, scenarios and calculations")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List input variables with their values
    Inputs(InputsArgs),

    /// Compute every scenario and show its result
    Scenarios(ScenariosArgs),

    /// Check the data file inputs and calculations
    Validate,

    /// Write Markdown and CSV exports of the data file
    Export(OutArgs),

    /// Write the combined JSON bundle of all content files
    Build(OutArgs),
}

#[derive(Debug, Args)]
pub struct InputsArgs {
    /// Only show variables of this variable_type
    #[arg(long = "type")]
    pub variable_type: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ScenariosArgs {
    /// Only show scenarios in this category ("All" shows every scenario)
    #[arg(long)]
    pub category: Option<String>,

    /// Override a variable before computing, as name=value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, f64)>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct OutArgs {
    /// Output location; defaults to the profile's output_dir
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) =
        s.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    let value: f64 =
        value.trim().parse().map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Inputs(args) => cmd::inputs::run(config, profile, args),
        Commands::Scenarios(args) => cmd::scenarios::run(config, profile, args),
        Commands::Validate => cmd::validate::run(config, profile),
        Commands::Export(args) => cmd::export::run(config, profile, args),
        Commands::Build(args) => cmd::build::run(config, profile, args),
    }
    logging::flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("users=5"), Ok(("users".to_string(), 5.0)));
        assert_eq!(parse_assignment(" x = -1.5 "), Ok(("x".to_string(), -1.5)));
        assert!(parse_assignment("users").is_err());
        assert!(parse_assignment("=3").is_err());
        assert!(parse_assignment("users=lots").is_err());
    }
}
