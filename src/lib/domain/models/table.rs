/// Cell values that count as missing, matched after trimming.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
}

/// In-memory table: named columns (names may repeat) and rows of string cells
/// aligned with the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Rows shorter than the header are padded with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<Self> {
        let width = headers.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                anyhow::bail!(
                    "row {} has {} fields but the header has {}",
                    idx + 1,
                    row.len(),
                    width
                );
            }
            row.resize(width, String::new());
            padded.push(row);
        }
        Ok(Self {
            headers,
            rows: padded,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of every column with this name.
    pub fn column_indices(&self, name: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() == name)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            let new_value = f(&row[idx]);
            row[idx] = new_value;
        }
    }

    /// Keeps the columns whose flag in `keep` is true.
    pub fn retain_columns(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.headers.len());
        let filter = |cells: &mut Vec<String>| {
            let mut flags = keep.iter();
            cells.retain(|_| *flags.next().unwrap_or(&true));
        };
        filter(&mut self.headers);
        for row in &mut self.rows {
            filter(row);
        }
    }

    pub fn retain_rows<F>(&mut self, mut f: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| f(row));
    }

    /// A new table holding rows `start..end` with the same header.
    pub fn slice_rows(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        Self {
            headers: self.headers.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_tokens() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("NaN"));
        assert!(is_missing(" null "));
        assert!(!is_missing("0"));
        assert!(!is_missing("none of it"));
    }

    #[test]
    fn short_rows_are_padded() {
        let table = Table::new(strings(&["a", "b", "c"]), vec![strings(&["1"])]).unwrap();
        assert_eq!(table.rows()[0], strings(&["1", "", ""]));
    }

    #[test]
    fn long_rows_are_rejected() {
        assert!(Table::new(strings(&["a"]), vec![strings(&["1", "2"])]).is_err());
    }

    #[test]
    fn retain_columns_keeps_alignment() {
        let mut table = Table::new(
            strings(&["a", "b", "a"]),
            vec![strings(&["1", "2", "3"]), strings(&["4", "5", "6"])],
        )
        .unwrap();
        assert_eq!(table.column_indices("a"), vec![0, 2]);
        table.retain_columns(&[true, false, true]);
        assert_eq!(table.headers(), strings(&["a", "a"]).as_slice());
        assert_eq!(table.rows()[1], strings(&["4", "6"]));
    }

    #[test]
    fn slice_rows_clamps() {
        let table = Table::new(
            strings(&["a"]),
            vec![strings(&["1"]), strings(&["2"]), strings(&["3"])],
        )
        .unwrap();
        assert_eq!(table.slice_rows(1, 10).row_count(), 2);
        assert_eq!(table.slice_rows(5, 10).row_count(), 0);
    }
}
