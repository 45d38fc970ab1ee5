//! Combined JSON bundle of every markdown file under the content directories.

use std::fs;
use std::path::Path;

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use super::ExportError;
use crate::content::loader::read_lenient;

/// One markdown file in the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
    /// File stem, used as the variable or scenario name.
    pub variable: String,
    /// Raw file content.
    pub content: String,
    /// Path relative to the walked directory, `/`-separated.
    pub relative_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub inputs: Vec<BundleEntry>,
    pub scenarios: Vec<BundleEntry>,
}

impl Bundle {
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ExportError::Write(path.to_path_buf(), e))
    }
}

pub fn build_bundle(inputs_dir: &Path, scenarios_dir: &Path) -> Result<Bundle, ExportError> {
    Ok(Bundle { inputs: walk_markdown(inputs_dir)?, scenarios: walk_markdown(scenarios_dir)? })
}

fn walk_markdown(root: &Path) -> Result<Vec<BundleEntry>, ExportError> {
    if !root.is_dir() {
        return Err(ExportError::MissingDir(root.display().to_string()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(|e| ExportError::Walk(root.display().to_string(), e))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let variable =
            path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

        entries.push(BundleEntry { variable, content: read_lenient(path), relative_path });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    tracing::debug!(dir = %root.display(), count = entries.len(), "bundled markdown files");
    Ok(entries)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}
