//! `{variable_name}` placeholder substitution in free text.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::content::VariableSet;
use crate::frontmatter::Frontmatter;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

/// Something that knows the display text of named variables.
pub trait DisplayLookup {
    /// Display text for `name`, or `None` if the name is unknown.
    fn display_text(&self, name: &str) -> Option<String>;
}

impl DisplayLookup for VariableSet {
    fn display_text(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| display_text(&v.frontmatter, name))
    }
}

impl DisplayLookup for BTreeMap<String, Frontmatter> {
    fn display_text(&self, name: &str) -> Option<String> {
        self.get(name).map(|fm| display_text(fm, name))
    }
}

/// `phrase_for_card`, else `nice_name`, else the bare name.
pub fn display_text(fields: &Frontmatter, name: &str) -> String {
    fields
        .text("phrase_for_card")
        .or_else(|| fields.text("nice_name"))
        .unwrap_or_else(|| name.to_string())
}

/// Replace each `{name}` whose name is known with its display text.
/// Unknown placeholders are left as written, braces included.
pub fn substitute<'a, L>(text: &'a str, vars: &L) -> Cow<'a, str>
where
    L: DisplayLookup + ?Sized,
{
    if text.is_empty() {
        return Cow::Borrowed(text);
    }
    PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
        vars.display_text(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
}

/// [`substitute`] that passes absent text through.
pub fn substitute_opt<'a, L>(text: Option<&'a str>, vars: &L) -> Option<Cow<'a, str>>
where
    L: DisplayLookup + ?Sized,
{
    text.map(|t| substitute(t, vars))
}
