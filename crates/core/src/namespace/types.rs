//! Namespace type.

use indexmap::IndexMap;
use serde::Serialize;

/// Variable name to current numeric value.
///
/// The namespace is owned by the caller and passed by reference to each
/// evaluation. Named operation steps write their results into it, so
/// bindings from one evaluation are visible to the next. A step whose
/// result was not computable binds the name to "no value", which is
/// distinct from the name being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Namespace {
    values: IndexMap<String, Option<f64>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current numeric value of `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }

    /// The raw binding: `None` if absent, `Some(None)` if bound to no value.
    pub fn binding(&self, name: &str) -> Option<Option<f64>> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Bind `name` to a value, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), Some(value));
    }

    /// Bind `name` to a possibly missing result.
    pub fn bind(&mut self, name: impl Into<String>, value: Option<f64>) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<f64>> {
        self.values.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut ns = Self::new();
        ns.extend(iter);
        ns
    }
}

impl<S: Into<String>> Extend<(S, f64)> for Namespace {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}
