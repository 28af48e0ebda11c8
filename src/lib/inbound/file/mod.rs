pub mod column_types;
pub mod csv;

pub use column_types::ColumnTypes;
pub use csv::Csv;
use std::path::Path;

pub struct Reader;

impl Reader {
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown file")
            .to_string()
    }
}
