use crate::domain::cleaner::Operation;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub operation: Operation,
    pub input: PathBuf,
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns_in: usize,
    pub columns_out: usize,
    pub cells_replaced: usize,
    pub files_written: Vec<PathBuf>,
    pub dry_run: bool,
    pub total_runtime_secs: f64,
}

pub fn log_summary(summary: &CleanSummary) {
    info!("=== {} Summary ===", summary.operation);
    info!("Input file: {}", summary.input.display());
    info!(
        "Rows: {} in, {} out",
        format_number(summary.rows_in),
        format_number(summary.rows_out)
    );
    info!(
        "Columns: {} in, {} out",
        format_number(summary.columns_in),
        format_number(summary.columns_out)
    );
    if summary.cells_replaced > 0 {
        info!(
            "Cells replaced with sentinel values: {}",
            format_number(summary.cells_replaced)
        );
    }
    if summary.dry_run {
        warn!("Dry run: no files were written");
    } else if summary.files_written.is_empty() {
        warn!("No files were written");
    } else {
        for path in &summary.files_written {
            info!("Wrote: {}", path.display());
        }
    }
    info!("Total runtime: {:.2}s", summary.total_runtime_secs);
}
