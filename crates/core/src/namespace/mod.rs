//! The variable namespace consulted and updated by the evaluator.

pub mod builder;
pub mod types;

pub use builder::{CoerceError, build_namespace, coerce_value, coerce_value_lenient};
pub use types::Namespace;
