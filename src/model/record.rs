use super::FieldValue;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// An ordered, map-backed record: column name to value.
pub type Row = IndexMap<String, FieldValue>;

/// Field access for a selectable record.
///
/// Typed objects implement this by matching column names to their own
/// properties; map-like records look the column up by key. Either way the
/// picker only ever sees values through [`Record::field`].
pub trait Record {
    /// The value shown in `column`, or `None` when the record has no such field.
    fn field(&self, column: &str) -> Option<FieldValue>;

    /// Column names in display order, used when the caller gives no columns.
    fn column_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, column: &str) -> Option<FieldValue> {
        (**self).field(column)
    }

    fn column_names(&self) -> Vec<String> {
        (**self).column_names()
    }
}

impl Record for Row {
    fn field(&self, column: &str) -> Option<FieldValue> {
        self.get(column).cloned()
    }

    fn column_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, column: &str) -> Option<FieldValue> {
        self.get(column).map(|v| FieldValue::Text(v.clone()))
    }

    fn column_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

// HashMap has no key order, so columns cannot be derived from it.
impl Record for HashMap<String, String> {
    fn field(&self, column: &str) -> Option<FieldValue> {
        self.get(column).map(|v| FieldValue::Text(v.clone()))
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, column: &str) -> Option<FieldValue> {
        self.get(column).map(FieldValue::from)
    }

    fn column_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// Build a [`Row`] from `(column, value)` pairs.
///
/// ```
/// use bim_picker::model::{row, Record};
///
/// let wall = row([("Name", "Wall-A"), ("Category", "Walls")]);
/// assert_eq!(wall.column_names(), vec!["Name", "Category"]);
/// ```
pub fn row<K, V, I>(pairs: I) -> Row
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
