//! # BIM Picker
//!
//! A terminal-based, keyboard-first picker for choosing rows out of a list:
//! elements, views, sheets, revisions, parameters.
//!
//! ## Features
//!
//! - Generic over any record type through the [`Record`] trait
//! - Incremental filtering with a small query language (`wall !ext | door`)
//! - Multi-select with keyboard and mouse
//! - Load records from CSV or JSON, export the chosen ones back
//!
//! ## Example
//!
//! ```no_run
//! use bim_picker::model::row;
//!
//! let sheets = vec![
//!     row([("Sheet", "A-101"), ("Name", "Ground Floor")]),
//!     row([("Sheet", "A-102"), ("Name", "First Floor")]),
//! ];
//! let chosen = bim_picker::select(&sheets, None, &[], Some("Print sheets"))?;
//! println!("Printing {} sheets", chosen.len());
//! # Ok::<(), bim_picker::error::PickerError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod model;
pub mod source;
pub mod ui;

pub use config::Settings;
pub use error::PickerError;
pub use filter::Query;
pub use model::{ColumnSpec, FieldValue, Record, Row};
pub use ui::Picker;

/// Show `records` in a picker and return the ones the user accepts, in
/// display order. Cancelling returns an empty list.
///
/// `columns` picks and orders the displayed fields; `None` takes them from
/// the first record. `initial_selection` holds record indices; out-of-range
/// indices are ignored.
pub fn select<'a, R: Record>(
    records: &'a [R],
    columns: Option<Vec<String>>,
    initial_selection: &[usize],
    title: Option<&str>,
) -> Result<Vec<&'a R>, PickerError> {
    let mut picker = Picker::new(records).initial_selection(initial_selection.iter().copied());
    if let Some(columns) = columns {
        picker = picker.columns(columns);
    }
    if let Some(title) = title {
        picker = picker.title(title);
    }
    picker.select()
}
