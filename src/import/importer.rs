use std::path::Path;

use serde::Serialize;
use sqlx::{Connection, SqliteConnection};
use tracing::{info, instrument, warn};

use super::{
    columns::{TableSpec, WritePolicy},
    delimited,
    normalize::{self, Value},
};
use crate::{
    config::ImportConfig,
    db,
    error::{ImportError, RowRejection},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum TableOutcome {
    Imported,
    Skipped(String),
}

/// What one `import_table` call did to its target table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: &'static str,
    pub policy: WritePolicy,
    pub outcome: TableOutcome,
    pub inserted: usize,
    pub rejected: Vec<RowRejection>,
}

impl TableReport {
    fn new(spec: &TableSpec) -> Self {
        Self {
            table: spec.table,
            policy: spec.policy,
            outcome: TableOutcome::Imported,
            inserted: 0,
            rejected: Vec::new(),
        }
    }

    fn skipped(spec: &TableSpec, reason: String) -> Self {
        Self {
            outcome: TableOutcome::Skipped(reason),
            ..Self::new(spec)
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, TableOutcome::Skipped(_))
    }
}

/// Load one delimited file into `spec.table` over a dedicated connection.
///
/// A missing or unreadable file skips the table, a bad row is logged and
/// skipped. Only storage failures are returned as errors.
#[instrument(skip(config, spec), fields(table = spec.table))]
pub async fn import_table(
    config: &ImportConfig,
    path: &Path,
    spec: &TableSpec,
) -> Result<TableReport, ImportError> {
    let parsed = match read_source(path, config.delimiter).await {
        Ok(t) => t,
        Err(e) if !e.is_fatal() => {
            warn!(error = %e, "skipping import");
            return Ok(TableReport::skipped(spec, e.to_string()));
        }
        Err(e) => return Err(e),
    };

    info!(path = %path.display(), rows = parsed.records.len(), "import started");

    let mut conn = db::connect(config).await?;
    let report = load_rows(&mut conn, spec, &parsed).await;
    conn.close()
        .await
        .map_err(|e| ImportError::storage("close connection", e))?;
    let report = report?;

    info!(
        inserted = report.inserted,
        rejected = report.rejected.len(),
        "import finished"
    );
    Ok(report)
}

async fn read_source(path: &Path, delimiter: char) -> Result<delimited::Table, ImportError> {
    let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImportError::SourceMissing {
            path: path.to_path_buf(),
        },
        _ => ImportError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    delimited::parse(&data, delimiter).map_err(|reason| ImportError::SourceUnreadable {
        path: path.to_path_buf(),
        reason,
    })
}

/// Insert every record in one transaction, committing once at the end.
async fn load_rows(
    conn: &mut SqliteConnection,
    spec: &TableSpec,
    parsed: &delimited::Table,
) -> Result<TableReport, ImportError> {
    let map = spec.reconcile(&parsed.headers);
    let missing = map.missing(spec);
    if !missing.is_empty() {
        info!(columns = ?missing, "absent columns filled with null");
    }

    let sql = spec.insert_sql();
    let mut report = TableReport::new(spec);
    for rejection in &parsed.malformed {
        reject(&mut report, rejection.clone());
    }

    let mut tx = conn
        .begin()
        .await
        .map_err(|e| ImportError::storage(format!("begin {} import", spec.table), e))?;

    for record in &parsed.records {
        let values = match normalize::raw_row(&map, record)
            .and_then(|row| normalize::coerce(spec, row))
        {
            Ok(v) => v,
            Err(rejection) => {
                reject(&mut report, rejection);
                continue;
            }
        };

        let mut query = sqlx::query(&sql);
        for value in values {
            query = match value {
                Value::Int(v) => query.bind(v),
                Value::Text(v) => query.bind(v),
            };
        }

        match query.execute(&mut *tx).await {
            Ok(_) => report.inserted += 1,
            Err(e) => reject(
                &mut report,
                RowRejection {
                    line: record.line,
                    reason: e.to_string(),
                },
            ),
        }
    }

    tx.commit()
        .await
        .map_err(|e| ImportError::storage(format!("commit {} import", spec.table), e))?;

    Ok(report)
}

fn reject(report: &mut TableReport, rejection: RowRejection) {
    warn!(
        table = report.table,
        line = rejection.line,
        reason = %rejection.reason,
        "row rejected"
    );
    report.rejected.push(rejection);
}
