#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core library for napkin: loads napkin-math inputs and scenarios from
//! Markdown with YAML front matter, evaluates their calculations, and
//! validates/exports the consolidated data file.

pub mod config;
pub mod content;
pub mod data;
pub mod eval;
pub mod export;
pub mod format;
pub mod frontmatter;
pub mod namespace;
pub mod placeholder;
pub mod validate;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
