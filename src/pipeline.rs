use serde::Serialize;
use sqlx::Connection;
use tracing::{info, instrument};

use crate::{
    config::ImportConfig,
    db,
    error::ImportError,
    import::{
        import_table,
        tables::{COMMENTS, REQUESTS, USERS},
        TableReport,
    },
    schema,
};

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub tables: Vec<TableReport>,
}

impl ImportSummary {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn rejected(&self) -> usize {
        self.tables.iter().map(|t| t.rejected.len()).sum()
    }
}

/// Schema first, then users, requests and comments in that order, since the
/// latter two reference users.
#[instrument(skip_all, fields(db = %config.database_path.display()))]
pub async fn run(config: &ImportConfig) -> Result<ImportSummary, ImportError> {
    let mut conn = db::connect(config).await?;
    schema::ensure_schema(&mut conn).await?;
    conn.close()
        .await
        .map_err(|e| ImportError::storage("close connection", e))?;

    let mut tables = Vec::with_capacity(3);
    for (path, spec) in [
        (&config.users_csv, &USERS),
        (&config.requests_csv, &REQUESTS),
        (&config.comments_csv, &COMMENTS),
    ] {
        tables.push(import_table(config, path, spec).await?);
    }

    let summary = ImportSummary { tables };
    info!(
        skipped = summary.tables.iter().filter(|t| t.is_skipped()).count(),
        rejected = summary.rejected(),
        "import completed successfully"
    );
    Ok(summary)
}
