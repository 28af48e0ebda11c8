use crate::{domain::models::Table, outbound::file::Writer};
use anyhow::Context;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub trait Csv {
    /// Writes the table to `path` through a temp file in the same directory,
    /// renamed over the target only once every row is flushed.
    fn try_table_to_csv(table: &Table, path: &Path) -> anyhow::Result<()>;
}

impl Csv for Writer {
    fn try_table_to_csv(table: &Table, path: &Path) -> anyhow::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in: {}", dir.display()))?;
        {
            let mut wtr = WriterBuilder::new().from_writer(&mut temp_file);
            wtr.write_record(table.headers())
                .with_context(|| format!("failed to write header to: {}", path.display()))?;
            for (idx, row) in table.rows().iter().enumerate() {
                wtr.write_record(row).with_context(|| {
                    format!("failed to write row {} to: {}", idx + 1, path.display())
                })?;
            }
            wtr.flush()
                .with_context(|| format!("failed to flush csv output for: {}", path.display()))?;
        }
        temp_file
            .flush()
            .with_context(|| format!("failed to flush temp file for: {}", path.display()))?;
        temp_file
            .as_file()
            .sync_all()
            .with_context(|| format!("failed to sync temp file for: {}", path.display()))?;
        temp_file
            .persist(path)
            .with_context(|| format!("failed to replace file: {}", path.display()))?;
        debug!(
            "Wrote {} rows x {} columns to {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );
        Ok(())
    }
}
