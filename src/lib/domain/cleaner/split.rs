use crate::domain::models::Table;
use std::path::{Path, PathBuf};

pub const CHUNK_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    Chunks(Vec<Table>),
    /// Fewer rows than chunks after the offset; nothing to write.
    Skipped { available: usize },
}

/// Sizes of `parts` contiguous chunks covering `total` rows. The first
/// `total % parts` chunks get one extra row.
pub fn chunk_sizes(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let base = total / parts;
    let remainder = total % parts;
    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

pub fn split_table(table: &Table, start_row: usize, parts: usize) -> SplitOutcome {
    let start = start_row.min(table.row_count());
    let total = table.row_count() - start;
    if parts == 0 || total < parts {
        return SplitOutcome::Skipped { available: total };
    }
    let mut offset = start;
    let chunks = chunk_sizes(total, parts)
        .into_iter()
        .map(|size| {
            let chunk = table.slice_rows(offset, offset + size);
            offset += size;
            chunk
        })
        .collect();
    SplitOutcome::Chunks(chunks)
}

/// `<dir>/<prefix><n>.csv` for n in 1..=parts.
pub fn chunk_paths(dir: &Path, prefix: &str, parts: usize) -> Vec<PathBuf> {
    (1..=parts)
        .map(|n| dir.join(format!("{}{}.csv", prefix, n)))
        .collect()
}
