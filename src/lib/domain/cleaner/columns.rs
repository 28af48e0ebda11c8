use crate::domain::models::Table;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRemovalReport {
    /// Later occurrences of a repeated name, in header order.
    pub duplicates_removed: Vec<String>,
    pub explicitly_removed: Vec<String>,
    /// Names asked for removal that were not in the table.
    pub not_found: Vec<String>,
}

/// Keeps the first column of every repeated name, then drops every column
/// named in `drop`. Absent names in `drop` are ignored.
pub fn remove_duplicate_columns(table: &mut Table, drop: &[String]) -> ColumnRemovalReport {
    let mut report = ColumnRemovalReport::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let drop_set: HashSet<&str> = drop.iter().map(String::as_str).collect();
    let mut keep = Vec::with_capacity(table.column_count());
    for header in table.headers() {
        if !seen.insert(header.as_str()) {
            report.duplicates_removed.push(header.clone());
            keep.push(false);
        } else if drop_set.contains(header.as_str()) {
            report.explicitly_removed.push(header.clone());
            keep.push(false);
        } else {
            keep.push(true);
        }
    }
    for name in drop {
        if !seen.contains(name.as_str()) && !report.not_found.contains(name) {
            debug!("Column '{}' not present, nothing to remove", name);
            report.not_found.push(name.clone());
        }
    }
    table.retain_columns(&keep);
    report
}
