pub mod columns;
pub mod normalize;
pub mod operation;
pub mod processor;
pub mod rows;
pub mod setup;
pub mod split;
pub mod summary;

pub use operation::Operation;
pub use processor::process;
pub use setup::setup_logging;
pub use summary::{CleanSummary, log_summary};
