//! Content directory loading.

use std::fs;
use std::path::Path;

use crate::frontmatter::{self, ParsedDocument};

use super::index::IndexManifest;
use super::types::{Scenario, Variable, VariableSet};

/// Read a file as UTF-8 text, yielding an empty string when it cannot be
/// read. Line endings are normalized to `\n`.
pub fn read_lenient(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s.replace("\r\n", "\n"),
        Err(e) => {
            tracing::debug!("treating {} as empty: {e}", path.display());
            String::new()
        }
    }
}

/// Load every indexed file of `dir` whose front matter names a
/// `variable_name`.
///
/// A later file with the same name replaces the earlier record in place.
pub fn load_variables(dir: &Path) -> VariableSet {
    let index = IndexManifest::load(dir);
    let mut variables = VariableSet::new();

    for (category, filename) in index.entries() {
        let path = IndexManifest::entry_path(dir, category, filename);
        let ParsedDocument { frontmatter, body } = frontmatter::parse(&read_lenient(&path));

        let Some(name) = frontmatter.text("variable_name") else {
            continue;
        };

        let variable = Variable {
            name: name.clone(),
            frontmatter,
            content: body,
            category: category.to_string(),
            path,
        };
        if let Some(previous) = variables.insert(name.clone(), variable) {
            tracing::warn!(
                "variable '{name}' from {} replaces the one from {}",
                variables[&name].path.display(),
                previous.path.display()
            );
        }
    }

    tracing::info!("loaded {} variables from {}", variables.len(), dir.display());
    variables
}

/// Load every indexed file of `dir` as a scenario, in manifest order.
pub fn load_scenarios(dir: &Path) -> Vec<Scenario> {
    let index = IndexManifest::load(dir);
    let mut scenarios = Vec::new();

    for (category, filename) in index.entries() {
        let path = IndexManifest::entry_path(dir, category, filename);
        let ParsedDocument { frontmatter, body } = frontmatter::parse(&read_lenient(&path));

        let category = frontmatter.text("category").unwrap_or_else(|| category.to_string());
        scenarios.push(Scenario {
            frontmatter,
            content: body,
            category,
            path,
            filename: filename.to_string(),
        });
    }

    tracing::info!("loaded {} scenarios from {}", scenarios.len(), dir.display());
    scenarios
}
