use super::create;
use crate::error::ExportError;
use crate::model::{ColumnSpec, FieldValue, Record};
use indexmap::IndexMap;
use std::io::Write;
use std::path::Path;

pub fn export_json<R: Record, P: AsRef<Path>>(
    records: &[&R],
    columns: &ColumnSpec,
    path: P,
) -> Result<(), ExportError> {
    let file = create(path.as_ref())?;
    write_json(file, records, columns)
}

/// Write a pretty JSON array with one object per record, keyed by column.
/// Missing fields are written as `null`.
pub fn write_json<W: Write, R: Record>(
    mut writer: W,
    records: &[&R],
    columns: &ColumnSpec,
) -> Result<(), ExportError> {
    let objects: Vec<IndexMap<&str, FieldValue>> = records
        .iter()
        .map(|record| {
            columns
                .names()
                .iter()
                .map(|name| (name.as_str(), record.field(name).unwrap_or(FieldValue::Null)))
                .collect()
        })
        .collect();

    let json = serde_json::to_string_pretty(&objects)?;

    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{row, Row};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_objects_in_column_order() {
        let records: Vec<Row> = vec![row([
            ("Level", FieldValue::from("Level 1")),
            ("Elevation", FieldValue::Number(3.5)),
        ])];
        let chosen: Vec<&Row> = records.iter().collect();
        let mut out = Vec::new();
        write_json(&mut out, &chosen, &ColumnSpec::new(["Elevation", "Level", "Missing"]))
            .expect("json");

        let parsed: serde_json::Value =
            serde_json::from_slice(&out).expect("valid json");
        assert_eq!(
            parsed,
            serde_json::json!([{"Elevation": 3.5, "Level": "Level 1", "Missing": null}])
        );
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.find("Elevation") < text.find("Level"));
    }

    #[test]
    fn empty_selection_is_empty_array() {
        let chosen: Vec<&Row> = Vec::new();
        let mut out = Vec::new();
        write_json(&mut out, &chosen, &ColumnSpec::new(["Name"])).expect("json");
        assert_eq!(String::from_utf8(out).expect("utf8"), "[]\n");
    }
}
