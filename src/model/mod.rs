pub mod columns;
pub mod element;
pub mod record;
pub mod value;

pub use columns::ColumnSpec;
pub use element::Element;
pub use record::{row, Record, Row};
pub use value::FieldValue;
