//! The `index.json` manifest of a content directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse index {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// Which files a content directory holds and how they are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Files at the directory root.
    #[serde(default)]
    pub files: Vec<String>,
    /// Category name to files inside `<dir>/<category>/`, in manifest order.
    #[serde(default)]
    pub categories: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for IndexManifest {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            categories: IndexMap::new(),
            last_updated: Some(Local::now().format("%Y-%m-%d").to_string()),
        }
    }
}

impl IndexManifest {
    /// Read `<dir>/index.json`.
    pub fn try_load(dir: &Path) -> Result<Self, IndexError> {
        let path = dir.join(INDEX_FILE);
        let s = fs::read_to_string(&path).map_err(|e| IndexError::Read(path.clone(), e))?;
        serde_json::from_str(&s).map_err(|e| IndexError::Parse(path, e))
    }

    /// Read `<dir>/index.json`, substituting an empty manifest dated today
    /// when the file is missing or malformed.
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(index) => index,
            Err(e) => {
                tracing::debug!("using empty index: {e}");
                Self::default()
            }
        }
    }

    /// Every `(category, file name)` pair, root files first with an empty
    /// category, then the categorized files in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let root = self.files.iter().map(|f| ("", f.as_str()));
        let categorized = self
            .categories
            .iter()
            .flat_map(|(cat, files)| files.iter().map(move |f| (cat.as_str(), f.as_str())));
        root.chain(categorized)
    }

    /// Location of an entry relative to the content directory.
    pub fn entry_path(dir: &Path, category: &str, filename: &str) -> PathBuf {
        if category.is_empty() { dir.join(filename) } else { dir.join(category).join(filename) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_index_defaults_to_empty() {
        let tmp = tempdir().unwrap();
        assert!(matches!(IndexManifest::try_load(tmp.path()), Err(IndexError::Read(..))));

        let index = IndexManifest::load(tmp.path());
        assert!(index.files.is_empty());
        assert!(index.categories.is_empty());
        assert_eq!(index.last_updated.as_deref().map(str::len), Some(10));
    }

    #[test]
    fn malformed_index_defaults_to_empty() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join(INDEX_FILE), "{ not json").unwrap();
        assert!(matches!(IndexManifest::try_load(tmp.path()), Err(IndexError::Parse(..))));
        assert_eq!(IndexManifest::load(tmp.path()).entries().count(), 0);
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join(INDEX_FILE), r#"{"files": "a.md"}"#).unwrap();
        assert!(IndexManifest::try_load(tmp.path()).is_err());
    }

    #[test]
    fn entries_keep_manifest_order() {
        let index: IndexManifest = serde_json::from_str(
            r#"{"files": ["a.md"], "categories": {"zeta": ["z.md"], "alpha": ["x.md", "y.md"]}}"#,
        )
        .unwrap();
        let entries: Vec<_> = index.entries().collect();
        assert_eq!(
            entries,
            vec![("", "a.md"), ("zeta", "z.md"), ("alpha", "x.md"), ("alpha", "y.md")]
        );
        assert_eq!(index.last_updated, None);
    }
}
