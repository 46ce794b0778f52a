use super::{FieldValue, Record};

/// Ordered column names: display order and the fields the filter searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSpec {
    names: Vec<String>,
}

impl ColumnSpec {
    #[must_use]
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Use `explicit` when given, otherwise the first record's own columns.
    #[must_use]
    pub fn resolve<R: Record>(explicit: Option<Vec<String>>, records: &[R]) -> Self {
        match explicit {
            Some(names) => Self { names },
            None => Self {
                names: records.first().map(Record::column_names).unwrap_or_default(),
            },
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// The record's values in column order; missing fields are `None`.
    pub fn values<'a, R: Record>(
        &'a self,
        record: &'a R,
    ) -> impl Iterator<Item = Option<FieldValue>> + 'a {
        self.names.iter().map(move |name| record.field(name))
    }

    /// The record's cells as display strings; missing fields are empty.
    #[must_use]
    pub fn cells<R: Record>(&self, record: &R) -> Vec<String> {
        self.values(record)
            .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }
}
