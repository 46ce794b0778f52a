use super::create;
use crate::error::ExportError;
use crate::model::{ColumnSpec, Record};
use std::io::Write;
use std::path::Path;

pub fn export_csv<R: Record, P: AsRef<Path>>(
    records: &[&R],
    columns: &ColumnSpec,
    path: P,
    delimiter: u8,
) -> Result<(), ExportError> {
    let file = create(path.as_ref())?;
    write_csv(file, records, columns, delimiter)
}

/// Write `columns` as the header row, then one row per record.
pub fn write_csv<W: Write, R: Record>(
    writer: W,
    records: &[&R],
    columns: &ColumnSpec,
    delimiter: u8,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(columns.names())?;

    for record in records {
        writer.write_record(columns.cells(*record))?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
