//! Loading records from CSV or JSON.

pub mod csv;
pub mod json;

pub use self::csv::read_csv;
pub use self::json::read_json;
pub use crate::error::SourceError;

use crate::model::Row;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Tabular data format for input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    /// Tab-separated values.
    Tsv,
    Json,
}

impl Format {
    /// Guess from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Format::Csv),
            "tsv" | "tab" => Some(Format::Tsv),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Field separator for the delimited formats.
    #[must_use]
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Format::Csv => Some(b','),
            Format::Tsv => Some(b'\t'),
            Format::Json => None,
        }
    }
}

/// Read records from `path`, or from stdin when `path` is `None` or `-`.
pub fn load(path: Option<&Path>, format: Format) -> Result<Vec<Row>, SourceError> {
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            let file = File::open(path).map_err(|source| SourceError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            let records = read(BufReader::new(file), format)?;
            log::info!("loaded {} records from {}", records.len(), path.display());
            Ok(records)
        }
        None => {
            let records = read(io::stdin().lock(), format)?;
            log::info!("loaded {} records from stdin", records.len());
            Ok(records)
        }
    }
}

pub fn read<Rd: Read>(reader: Rd, format: Format) -> Result<Vec<Row>, SourceError> {
    match format {
        Format::Csv => read_csv(reader, b','),
        Format::Tsv => read_csv(reader, b'\t'),
        Format::Json => read_json(reader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Record;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("doors.CSV")), Some(Format::Csv));
        assert_eq!(Format::from_path(Path::new("views.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("views.tsv")), Some(Format::Tsv));
        assert_eq!(Format::from_path(Path::new("notes.txt")), None);
        assert_eq!(Format::from_path(Path::new("model.ifc")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "Name,Category").expect("write");
        writeln!(file, "Wall-A,Walls").expect("write");
        let records = load(Some(file.path()), Format::Csv).expect("load");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Some(Path::new("/definitely/not/here.csv")), Format::Csv)
            .expect_err("missing file");
        assert!(matches!(err, SourceError::FileRead { .. }));
    }

    #[test]
    fn tsv_files_load_by_extension() {
        let data = "Name\tCategory\nWall-A\tWalls\n";
        let format = Format::from_path(Path::new("views.tsv")).expect("known extension");
        let records = read(data.as_bytes(), format).expect("tsv");
        assert_eq!(records[0].column_names(), vec!["Name", "Category"]);
    }
}
