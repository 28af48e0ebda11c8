use anyhow::Context;
use colored::Colorize;
use tabular_cleaner::{
    config::Config,
    domain::cleaner::{Operation, log_summary, process, setup_logging},
};
use tracing::error;

fn main() -> anyhow::Result<()> {
    let dry_run = std::env::args().any(|arg| arg == "--dry-run" || arg == "--dr");
    let operation: Operation = std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .context("Missing operation: expected normalize, dedupe-columns, dedupe-rows or split")?
        .parse()?;
    let config =
        Config::from_env().context("Failed to load configuration from environment variables")?;

    setup_logging(&config, operation, dry_run)?;

    let summary = match process(operation, &config, dry_run) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{} failed: {:#}", operation, e);
            return Err(e);
        }
    };
    log_summary(&summary);

    let done = format!(
        "{} finished: {} rows in, {} rows out, {} file(s) written",
        operation,
        summary.rows_in,
        summary.rows_out,
        summary.files_written.len()
    );
    if summary.files_written.is_empty() {
        println!("{}", done.yellow());
    } else {
        println!("{}", done.green());
    }

    Ok(())
}
