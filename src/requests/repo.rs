use sqlx::SqlitePool;

use crate::requests::repo_types::{RequestStats, ServiceRequest};

impl ServiceRequest {
    /// Newest requests first.
    pub async fn list(db: &SqlitePool, limit: i64, offset: i64) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, ServiceRequest>(
            r#"
            SELECT request_id, start_date, climate_tech_type, climate_tech_model,
                   problem_description, request_status, completion_date, repair_parts,
                   master_id, client_id
            FROM requests
            ORDER BY request_id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &SqlitePool) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requests")
            .fetch_one(db)
            .await?;
        Ok(n)
    }

    /// Aggregates behind the statistics page. A request counts as completed
    /// once it has a completion date.
    pub async fn stats(db: &SqlitePool) -> anyhow::Result<RequestStats> {
        let (total, completed) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(completion_date)
            FROM requests
            "#,
        )
        .fetch_one(db)
        .await?;

        let by_status = sqlx::query_as::<_, (Option<String>, i64)>(
            r#"
            SELECT request_status, COUNT(*) AS n
            FROM requests
            GROUP BY request_status
            ORDER BY n DESC, request_status
            "#,
        )
        .fetch_all(db)
        .await?;

        let by_tech_type = sqlx::query_as::<_, (Option<String>, i64)>(
            r#"
            SELECT climate_tech_type, COUNT(*) AS n
            FROM requests
            GROUP BY climate_tech_type
            ORDER BY n DESC, climate_tech_type
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(RequestStats {
            total,
            completed,
            by_status,
            by_tech_type,
        })
    }
}
