//! Loading variables and scenarios from indexed content directories.
//!
//! A content directory holds an `index.json` manifest plus the Markdown files
//! it lists, either at the root or under one sub-directory per category:
//! ```text
//! inputs/
//!   index.json
//!   world_population.md
//!   economy/
//!     gdp__world__usd.md
//! ```

pub mod index;
pub mod loader;
pub mod query;
pub mod types;

pub use index::{IndexError, IndexManifest};
pub use loader::{load_scenarios, load_variables, read_lenient};
pub use query::{filter_by_category, inputs_by_type, unique_categories};
pub use types::{Scenario, Variable, VariableSet};
