//! CSV rendering of the data file sections.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{ExportError, cell_text};
use crate::data::DataFile;

pub const INPUT_COLUMNS: [&str; 9] = [
    "variable",
    "value",
    "units",
    "value_description",
    "variable_type",
    "confidence_in_number",
    "key_assumption",
    "source_url",
    "source_notes",
];

pub const CALCULATION_COLUMNS: [&str; 7] = [
    "title",
    "description",
    "inputs",
    "result_label",
    "result_units",
    "result_value",
    "explanation",
];

/// Write the `inputs` section as CSV to `writer`.
pub fn inputs_csv<W: Write>(data: &DataFile, writer: W) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(INPUT_COLUMNS)?;
    for item in data.inputs() {
        w.write_record(INPUT_COLUMNS.iter().map(|col| cell_text(item.get(col)).unwrap_or_default()))?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the `calculations` section as CSV to `writer`.
pub fn calculations_csv<W: Write>(data: &DataFile, writer: W) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CALCULATION_COLUMNS)?;
    for item in data.calculations() {
        let text = |key: &str| cell_text(item.get(key)).unwrap_or_default();
        let result = |key: &str| cell_text(item.result_field(key)).unwrap_or_default();
        w.write_record([
            text("title"),
            text("description"),
            item.input_names().unwrap_or_default().join(", "),
            result("label"),
            result("units"),
            result("value"),
            text("explanation"),
        ])?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_inputs_csv(data: &DataFile, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Write(path.to_path_buf(), e))?;
    inputs_csv(data, file)
}

pub fn write_calculations_csv(data: &DataFile, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Write(path.to_path_buf(), e))?;
    calculations_csv(data, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: fn(&DataFile, &mut Vec<u8>) -> Result<(), ExportError>, yaml: &str) -> String {
        let mut buf = Vec::new();
        f(&DataFile::from_yaml(yaml).unwrap(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn inputs_rows_follow_column_order() {
        let out = render(
            |d, w| inputs_csv(d, w),
            "inputs:\n  - variable: a__b__c\n    value: 2.5\n    source_notes: 'says \"hi\", twice'\n",
        );
        assert_eq!(
            out,
            "variable,value,units,value_description,variable_type,confidence_in_number,key_assumption,source_url,source_notes\n\
             a__b__c,2.5,,,,,,,\"says \"\"hi\"\", twice\"\n"
        );
    }

    #[test]
    fn calculation_inputs_are_joined() {
        let out = render(
            |d, w| calculations_csv(d, w),
            "calculations:\n  - title: T\n    inputs: [x, y]\n    result: {label: L, value: 3}\n",
        );
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("title,description,inputs,result_label,result_units,result_value,explanation")
        );
        assert_eq!(lines.next(), Some("T,,\"x, y\",L,,3,"));
    }

    #[test]
    fn header_only_when_section_missing() {
        let out = render(|d, w| calculations_csv(d, w), "inputs: []\n");
        assert_eq!(out.lines().count(), 1);
    }
}
