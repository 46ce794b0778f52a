//! Query parsing and record filtering.
//!
//! Query language: `|` separates OR-groups, whitespace separates terms
//! within a group, and a leading `!` negates a term. Matching is a
//! case-insensitive substring test against each column's display string.

pub mod query;

pub use query::{Group, Query, GROUP_SEPARATOR, NEGATION_PREFIX};

use crate::model::{ColumnSpec, FieldValue, Record};

/// Indices of the records kept by `query`, in original order, or stably
/// sorted by the first column when `sort_by_first_column` is set.
pub fn filter_view<R: Record>(
    records: &[R],
    columns: &ColumnSpec,
    query: &Query,
    sort_by_first_column: bool,
) -> Vec<usize> {
    let mut view: Vec<usize> = if query.is_empty() {
        (0..records.len()).collect()
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| query.matches_lowercase(&haystacks(columns, *record)))
            .map(|(i, _)| i)
            .collect()
    };

    if sort_by_first_column {
        sort_by_first(records, columns, &mut view);
    }

    view
}

/// Lowercased display strings of the record's present, non-null cells.
fn haystacks<R: Record>(columns: &ColumnSpec, record: &R) -> Vec<String> {
    columns
        .values(record)
        .flatten()
        .filter(|v| !v.is_null())
        .map(|v| v.to_string().to_lowercase())
        .collect()
}

fn sort_by_first<R: Record>(records: &[R], columns: &ColumnSpec, view: &mut [usize]) {
    let Some(first) = columns.first() else {
        return;
    };
    let keys: Vec<Option<FieldValue>> = view.iter().map(|&i| records[i].field(first)).collect();
    let mut order: Vec<usize> = (0..view.len()).collect();
    order.sort_by(|&a, &b| FieldValue::sort_cmp(keys[a].as_ref(), keys[b].as_ref()));
    let sorted: Vec<usize> = order.iter().map(|&k| view[k]).collect();
    view.copy_from_slice(&sorted);
}
