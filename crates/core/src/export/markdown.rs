//! Markdown rendering of the data file sections.

use std::fmt::Write;

use super::cell_text;
use crate::data::DataFile;

const NA: &str = "N/A";

/// `# Inputs Data` followed by one `## <variable>` section per input.
pub fn inputs_markdown(data: &DataFile) -> String {
    let mut out = String::from("# Inputs Data\n\n");
    for item in data.inputs() {
        let field = |key: &str| cell_text(item.get(key)).unwrap_or_else(|| NA.to_string());
        let name = item.variable().unwrap_or_else(|| "Unnamed Variable".to_string());

        let _ = writeln!(out, "## {name}\n");
        let _ = writeln!(out, "- **Value**: {}", field("value"));
        let _ = writeln!(out, "- **Units**: {}", field("units"));
        let _ = writeln!(out, "- **Description**: {}", field("value_description"));
        let _ = writeln!(out, "- **Variable Type**: {}", field("variable_type"));
        let _ = writeln!(out, "- **Confidence in Number**: {}", field("confidence_in_number"));
        let _ = writeln!(out, "- **Key Assumption**: {}", field("key_assumption"));
        let _ = writeln!(out, "- **Source URL**: {}", field("source_url"));
        let _ = writeln!(out, "- **Source Notes**: {}\n", field("source_notes"));
    }
    out
}

/// `# Calculations Data` followed by one `## <title>` section per calculation.
pub fn calculations_markdown(data: &DataFile) -> String {
    let mut out = String::from("# Calculations Data\n\n");
    for item in data.calculations() {
        let field = |key: &str| cell_text(item.get(key)).unwrap_or_else(|| NA.to_string());
        let result = |key: &str| cell_text(item.result_field(key)).unwrap_or_else(|| NA.to_string());
        let title = item.title().unwrap_or_else(|| "Unnamed Calculation".to_string());
        let inputs = item.input_names().unwrap_or_default().join(", ");

        let _ = writeln!(out, "## {title}\n");
        let _ = writeln!(out, "- **Description**: {}", field("description"));
        let _ = writeln!(out, "- **Inputs**: {inputs}");
        let _ = writeln!(out, "- **Result Label**: {}", result("label"));
        let _ = writeln!(out, "- **Units**: {}", result("units"));
        let _ = writeln!(out, "- **Value**: {}", result("value"));
        let _ = writeln!(out, "- **Explanation**: {}\n", field("explanation"));
    }
    out
}
