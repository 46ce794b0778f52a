use crate::error::SourceError;
use crate::model::{FieldValue, Row};
use std::io::Read;

/// Read delimited text with a header row. Short rows leave their trailing
/// columns out; numeric-looking cells become numbers.
pub fn read_csv<Rd: Read>(reader: Rd, delimiter: u8) -> Result<Vec<Row>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), FieldValue::parse_text(value)))
            .collect();
        records.push(row);
    }

    Ok(records)
}
