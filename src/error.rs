use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A single input record that could not be normalized or inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub line: usize,   // 1-based line in the source file
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("storage unavailable: {context}")]
    StorageUnavailable {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("source file not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("source file {} unreadable: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("row at line {} rejected: {}", .0.line, .0.reason)]
    RowRejected(RowRejection),
}

impl ImportError {
    pub fn storage(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::StorageUnavailable {
            context: context.into(),
            source,
        }
    }

    /// Only storage failures abort the pipeline; everything else is skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

impl From<RowRejection> for ImportError {
    fn from(r: RowRejection) -> Self {
        Self::RowRejected(r)
    }
}
