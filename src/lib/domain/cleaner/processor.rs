use crate::config::Config;
use crate::domain::cleaner::{
    CleanSummary, Operation,
    columns::remove_duplicate_columns,
    normalize::normalize_types,
    rows::remove_duplicate_rows,
    split::{CHUNK_COUNT, SplitOutcome, chunk_paths, split_table},
    summary::format_number,
};
use crate::domain::models::Table;
use crate::inbound::file::{ColumnTypes, Csv as CsvReader, Reader};
use crate::outbound::file::{Csv as CsvWriter, Writer};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

struct Outcome {
    rows_out: usize,
    columns_out: usize,
    cells_replaced: usize,
    files_written: Vec<PathBuf>,
}

fn load(path: &Path) -> anyhow::Result<Table> {
    let table = Reader::try_csv_to_table(path)?;
    info!(
        "Loaded '{}': {} rows, {} columns",
        Reader::display_name(path),
        format_number(table.row_count()),
        table.column_count()
    );
    Ok(table)
}

fn persist(table: &Table, path: &Path, dry_run: bool) -> anyhow::Result<Vec<PathBuf>> {
    if dry_run {
        info!("Dry run: would write {}", path.display());
        return Ok(Vec::new());
    }
    Writer::try_table_to_csv(table, path)?;
    Ok(vec![path.to_path_buf()])
}

fn normalize(config: &Config, mut table: Table, dry_run: bool) -> anyhow::Result<Outcome> {
    let spec = Reader::try_json_to_column_types(&config.column_types_path)?;
    info!(
        "Normalizing {} typed column(s) from {}",
        spec.len(),
        config.column_types_path.display()
    );
    let report = normalize_types(&mut table, &spec);
    info!(
        "Filled {} missing cell(s), coerced {} unparseable cell(s)",
        format_number(report.total_filled()),
        format_number(report.total_coerced())
    );
    if !report.skipped_columns.is_empty() {
        warn!(
            "Typed columns not in input: [{}]",
            report.skipped_columns.join(", ")
        );
    }
    let files_written = persist(&table, &config.output_path, dry_run)?;
    Ok(Outcome {
        rows_out: table.row_count(),
        columns_out: table.column_count(),
        cells_replaced: report.total_filled() + report.total_coerced(),
        files_written,
    })
}

fn dedupe_columns(config: &Config, mut table: Table, dry_run: bool) -> anyhow::Result<Outcome> {
    let report = remove_duplicate_columns(&mut table, &config.drop_columns);
    info!(
        "Removed {} repeated column(s) and {} listed column(s)",
        report.duplicates_removed.len(),
        report.explicitly_removed.len()
    );
    let files_written = persist(&table, &config.input_path, dry_run)?;
    Ok(Outcome {
        rows_out: table.row_count(),
        columns_out: table.column_count(),
        cells_replaced: 0,
        files_written,
    })
}

fn dedupe_rows(config: &Config, mut table: Table, dry_run: bool) -> anyhow::Result<Outcome> {
    let removed = remove_duplicate_rows(&mut table, &config.dedup_key).with_context(|| {
        format!(
            "failed to deduplicate rows of: {}",
            config.input_path.display()
        )
    })?;
    info!(
        "Removed {} duplicate row(s) by key ({})",
        format_number(removed),
        config.dedup_key.join(", ")
    );
    let files_written = persist(&table, &config.input_path, dry_run)?;
    Ok(Outcome {
        rows_out: table.row_count(),
        columns_out: table.column_count(),
        cells_replaced: 0,
        files_written,
    })
}

fn split(config: &Config, table: Table, dry_run: bool) -> anyhow::Result<Outcome> {
    let chunks = match split_table(&table, config.split_start_row, CHUNK_COUNT) {
        SplitOutcome::Chunks(chunks) => chunks,
        SplitOutcome::Skipped { available } => {
            warn!(
                "Only {} row(s) after start row {}; need at least {} to split, no files written",
                available, config.split_start_row, CHUNK_COUNT
            );
            return Ok(Outcome {
                rows_out: 0,
                columns_out: table.column_count(),
                cells_replaced: 0,
                files_written: Vec::new(),
            });
        }
    };
    let paths = chunk_paths(
        &config.split_output_dir,
        &config.split_file_prefix,
        CHUNK_COUNT,
    );
    let mut files_written = Vec::new();
    let mut rows_out = 0;
    for (chunk, path) in chunks.iter().zip(&paths) {
        info!(
            "Chunk {}: {} rows",
            path.display(),
            format_number(chunk.row_count())
        );
        rows_out += chunk.row_count();
        files_written.extend(persist(chunk, path, dry_run)?);
    }
    Ok(Outcome {
        rows_out,
        columns_out: table.column_count(),
        cells_replaced: 0,
        files_written,
    })
}

/// Loads the input, runs one procedure and writes its result.
pub fn process(operation: Operation, config: &Config, dry_run: bool) -> anyhow::Result<CleanSummary> {
    let start_time = Instant::now();
    let table = load(&config.input_path)?;
    let rows_in = table.row_count();
    let columns_in = table.column_count();
    let outcome = match operation {
        Operation::Normalize => normalize(config, table, dry_run)?,
        Operation::DedupeColumns => dedupe_columns(config, table, dry_run)?,
        Operation::DedupeRows => dedupe_rows(config, table, dry_run)?,
        Operation::Split => split(config, table, dry_run)?,
    };
    Ok(CleanSummary {
        operation,
        input: config.input_path.clone(),
        rows_in,
        rows_out: outcome.rows_out,
        columns_in,
        columns_out: outcome.columns_out,
        cells_replaced: outcome.cells_replaced,
        files_written: outcome.files_written,
        dry_run,
        total_runtime_secs: start_time.elapsed().as_secs_f64(),
    })
}
