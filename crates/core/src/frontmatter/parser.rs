//! Front matter parsing from Markdown documents.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

use super::types::{Frontmatter, ParsedDocument, scalar_to_string};

/// Errors that can occur during front matter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML front matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t\r]*\n(.*?)\n---[ \t\r]*\n").expect("valid regex")
});

/// Parse front matter leniently.
///
/// A YAML decode error, or YAML that is not a mapping, yields an empty
/// front matter with the body still split off.
pub fn parse(content: &str) -> ParsedDocument {
    match try_parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("ignoring malformed front matter: {e}");
            ParsedDocument { frontmatter: Frontmatter::default(), body: split(content).1 }
        }
    }
}

/// Parse front matter, reporting YAML problems.
///
/// Without a leading `---` block the whole content is the body, untouched.
/// With one, the body is the remainder trimmed of surrounding whitespace.
pub fn try_parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let (yaml, body) = split(content);
    let frontmatter = match yaml {
        Some(yaml) => decode(yaml)?,
        None => Frontmatter::default(),
    };
    Ok(ParsedDocument { frontmatter, body })
}

fn split(content: &str) -> (Option<&str>, String) {
    match FRONTMATTER_RE.captures(content) {
        Some(caps) => {
            let yaml = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(yaml), content[end..].trim().to_string())
        }
        None => (None, content.to_string()),
    }
}

fn decode(yaml: &str) -> Result<Frontmatter, FrontmatterParseError> {
    let value: Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        Value::Null => return Ok(Frontmatter::default()),
        Value::Mapping(m) => m,
        Value::Sequence(_) => return Err(FrontmatterParseError::NotAMapping("a sequence")),
        _ => return Err(FrontmatterParseError::NotAMapping("a scalar")),
    };

    let mut fm = Frontmatter::default();
    for (k, v) in mapping {
        // Non-string scalar keys (`2024: x`) are kept under their text form.
        if let Some(key) = scalar_to_string(&k) {
            fm.insert(key, v);
        }
    }
    Ok(fm)
}
