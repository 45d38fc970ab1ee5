//! Front matter parsing for Markdown content files.
//!
//! A content file may start with a YAML block delimited by `---` lines:
//! ```markdown
//! ---
//! variable_name: users__world__count
//! value: 8000000000
//! ---
//! Body text
//! ```
//! Parsing is lenient: malformed YAML yields an empty mapping instead of an
//! error. Use [`try_parse`] when the error itself matters.

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, parse, try_parse};
pub use types::{Frontmatter, ParsedDocument, scalar_to_string};
