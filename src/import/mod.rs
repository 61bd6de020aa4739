pub mod columns;
pub mod delimited;
pub mod importer;
pub mod normalize;
pub mod tables;

pub use importer::{import_table, TableOutcome, TableReport};
