use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub column_types_path: PathBuf,
    pub drop_columns: Vec<String>,
    pub dedup_key: Vec<String>,
    pub split_start_row: usize,
    pub split_output_dir: PathBuf,
    pub split_file_prefix: String,
    pub log_level: tracing::Level,
    pub log_dir: PathBuf,
}

const INPUT_PATH_KEY: &str = "INPUT_PATH";
const OUTPUT_PATH_KEY: &str = "OUTPUT_PATH";
const COLUMN_TYPES_PATH_KEY: &str = "COLUMN_TYPES_PATH";
const DROP_COLUMNS_KEY: &str = "DROP_COLUMNS";
const DEDUP_KEY_KEY: &str = "DEDUP_KEY";
const SPLIT_START_ROW_KEY: &str = "SPLIT_START_ROW";
const SPLIT_OUTPUT_DIR_KEY: &str = "SPLIT_OUTPUT_DIR";
const SPLIT_FILE_PREFIX_KEY: &str = "SPLIT_FILE_PREFIX";
const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
const LOG_DIR_KEY: &str = "LOG_DIR";

const DEFAULT_OUTPUT_PATH: &str = "cleaned_file.csv";
const DEFAULT_COLUMN_TYPES_PATH: &str = "config/dividends_column_types.json";
const DEFAULT_DEDUP_KEY: &str = "symbol,date";
const DEFAULT_SPLIT_OUTPUT_DIR: &str = ".";
const DEFAULT_SPLIT_FILE_PREFIX: &str = "part";
const DEFAULT_LOG_DIR: &str = "log";

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_path = lookup(INPUT_PATH_KEY)
            .map(PathBuf::from)
            .with_context(|| format!("{} is not set", INPUT_PATH_KEY))?;
        let output_path =
            PathBuf::from(lookup(OUTPUT_PATH_KEY).unwrap_or_else(|| DEFAULT_OUTPUT_PATH.into()));
        let column_types_path = PathBuf::from(
            lookup(COLUMN_TYPES_PATH_KEY).unwrap_or_else(|| DEFAULT_COLUMN_TYPES_PATH.into()),
        );
        let drop_columns = lookup(DROP_COLUMNS_KEY)
            .map(|raw| split_list(&raw))
            .unwrap_or_default();
        let dedup_key = split_list(
            &lookup(DEDUP_KEY_KEY).unwrap_or_else(|| DEFAULT_DEDUP_KEY.into()),
        );
        if dedup_key.is_empty() {
            anyhow::bail!("{} must name at least one column", DEDUP_KEY_KEY);
        }
        let split_start_row: usize = match lookup(SPLIT_START_ROW_KEY) {
            Some(raw) => raw.trim().parse().with_context(|| {
                format!("{} must be a non-negative integer, got '{}'", SPLIT_START_ROW_KEY, raw)
            })?,
            None => 0,
        };
        let split_output_dir = PathBuf::from(
            lookup(SPLIT_OUTPUT_DIR_KEY).unwrap_or_else(|| DEFAULT_SPLIT_OUTPUT_DIR.into()),
        );
        let split_file_prefix =
            lookup(SPLIT_FILE_PREFIX_KEY).unwrap_or_else(|| DEFAULT_SPLIT_FILE_PREFIX.into());
        let log_level = match lookup(LOG_LEVEL_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<tracing::Level>()
                .with_context(|| format!("{} is not a valid level: '{}'", LOG_LEVEL_KEY, raw))?,
            None => tracing::Level::INFO,
        };
        let log_dir = PathBuf::from(lookup(LOG_DIR_KEY).unwrap_or_else(|| DEFAULT_LOG_DIR.into()));

        Ok(Self {
            input_path,
            output_path,
            column_types_path,
            drop_columns,
            dedup_key,
            split_start_row,
            split_output_dir,
            split_file_prefix,
            log_level,
            log_dir,
        })
    }
}
