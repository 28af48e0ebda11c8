pub mod column_type;
pub mod table;

pub use column_type::{ColumnKind, ColumnTypeSpec};
pub use table::{Table, is_missing};
