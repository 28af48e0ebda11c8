use crate::{domain::models::ColumnTypeSpec, inbound::file::Reader};
use anyhow::Context;
use std::path::Path;

pub trait ColumnTypes {
    fn try_json_to_column_types(path: &Path) -> anyhow::Result<ColumnTypeSpec>;
}

impl ColumnTypes for Reader {
    fn try_json_to_column_types(path: &Path) -> anyhow::Result<ColumnTypeSpec> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read column type file: {}", path.display()))?;
        let spec: ColumnTypeSpec = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse column type file: {}", path.display()))?;
        if spec.is_empty() {
            anyhow::bail!("column type file '{}' names no columns", path.display());
        }
        Ok(spec)
    }
}
