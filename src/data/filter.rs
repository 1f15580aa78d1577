use std::collections::BTreeSet;

use super::error::{DataError, Result};
use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Column scans over a loaded table
// ---------------------------------------------------------------------------

/// Every distinct value of `column`, once each, in ascending order.
pub fn distinct_values(table: &Table, column: &str) -> Result<Vec<String>> {
    require_column(table, column)?;

    let values: BTreeSet<&str> = table
        .rows()
        .iter()
        .filter_map(|row| row.get(column))
        .collect();

    Ok(values.into_iter().map(str::to_string).collect())
}

/// Rows whose `column` contains `term`, ignoring case, in table order.
///
/// An empty `term` matches every row.
pub fn find_by_column_and_value(table: &Table, column: &str, term: &str) -> Result<Vec<Row>> {
    require_column(table, column)?;

    let needle = term.to_lowercase();
    Ok(table
        .rows()
        .iter()
        .filter(|row| row.get(column).is_some_and(|v| contains_ignore_case(v, &needle)))
        .cloned()
        .collect())
}

/// Rows where any column contains `term`, ignoring case, in table order.
///
/// Each row appears at most once however many of its columns match.
pub fn find_by_value(table: &Table, term: &str) -> Vec<Row> {
    let needle = term.to_lowercase();
    table
        .rows()
        .iter()
        .filter(|row| row.iter().any(|(_, v)| contains_ignore_case(v, &needle)))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn require_column(table: &Table, column: &str) -> Result<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(DataError::MissingColumn(column.to_string()))
    }
}
