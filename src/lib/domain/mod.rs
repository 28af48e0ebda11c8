pub mod cleaner;
pub mod models;
