pub mod csv;
pub mod json;

pub use crate::error::ExportError;
pub use self::csv::{export_csv, write_csv};
pub use self::json::{export_json, write_json};

use std::fs::File;
use std::path::Path;

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::FileCreate {
        path: path.to_path_buf(),
        source,
    })
}
