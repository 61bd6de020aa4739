pub mod comments;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod pipeline;
pub mod requests;
pub mod schema;
pub mod users;

pub use config::ImportConfig;
pub use error::{ImportError, RowRejection};
pub use pipeline::{run, ImportSummary};
