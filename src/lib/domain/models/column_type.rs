use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ColumnKind {
    #[serde(
        rename = "string",
        alias = "text",
        alias = "character varying",
        alias = "varchar"
    )]
    String,
    #[serde(
        rename = "float",
        alias = "real",
        alias = "double precision",
        alias = "numeric"
    )]
    Float,
    #[serde(rename = "date")]
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::String => write!(f, "string"),
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Date => write!(f, "date"),
        }
    }
}

/// Column name → kind, loaded from a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColumnTypeSpec(BTreeMap<String, ColumnKind>);

impl ColumnTypeSpec {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, column: impl Into<String>, kind: ColumnKind) -> Self {
        self.0.insert(column.into(), kind);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.0.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
