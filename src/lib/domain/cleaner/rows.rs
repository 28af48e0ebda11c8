use crate::domain::models::Table;
use std::collections::HashSet;

/// Removes every row whose key tuple was already seen earlier in the table.
/// Returns the number of rows removed.
pub fn remove_duplicate_rows(table: &mut Table, key: &[String]) -> anyhow::Result<usize> {
    if key.is_empty() {
        anyhow::bail!("row key must name at least one column");
    }
    let mut key_indices = Vec::with_capacity(key.len());
    for column in key {
        let idx = table.column_index(column).ok_or_else(|| {
            anyhow::anyhow!(
                "key column '{}' not found; available columns: [{}]",
                column,
                table.headers().join(", ")
            )
        })?;
        key_indices.push(idx);
    }
    let before = table.row_count();
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
    table.retain_rows(|row| seen.insert(key_indices.iter().map(|&i| row[i].clone()).collect()));
    Ok(before - table.row_count())
}
