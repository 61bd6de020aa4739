//! Relational schema for users, repair requests and their comments.

use sqlx::{Connection, SqliteConnection};
use tracing::{info, instrument};

use crate::error::ImportError;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        fio TEXT,
        phone TEXT,
        login TEXT UNIQUE,
        password TEXT,
        user_type TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        registration_date TEXT DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_REQUESTS: &str = r#"
    CREATE TABLE IF NOT EXISTS requests (
        request_id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_date TEXT,
        climate_tech_type TEXT,
        climate_tech_model TEXT,
        problem_description TEXT,
        request_status TEXT,
        completion_date TEXT,
        repair_parts TEXT,
        master_id INTEGER,
        client_id INTEGER,
        FOREIGN KEY(master_id) REFERENCES users(user_id),
        FOREIGN KEY(client_id) REFERENCES users(user_id)
    )
"#;

const CREATE_COMMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        message TEXT,
        master_id INTEGER,
        request_id INTEGER,
        FOREIGN KEY(master_id) REFERENCES users(user_id),
        FOREIGN KEY(request_id) REFERENCES requests(request_id)
    )
"#;

/// Create the three tables if absent. Existing tables and rows are left alone.
#[instrument(skip(conn))]
pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<(), ImportError> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| ImportError::storage("begin schema tx", e))?;

    for (table, ddl) in [
        ("users", CREATE_USERS),
        ("requests", CREATE_REQUESTS),
        ("comments", CREATE_COMMENTS),
    ] {
        sqlx::query(ddl)
            .execute(&mut *tx)
            .await
            .map_err(|e| ImportError::storage(format!("create table {table}"), e))?;
    }

    tx.commit()
        .await
        .map_err(|e| ImportError::storage("commit schema", e))?;

    info!("schema created/updated");
    Ok(())
}

/// Column names of `table` in declaration order.
pub async fn table_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(&mut *conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ImportConfig, db};

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ImportConfig::in_dir(dir.path());
        let mut conn = db::connect(&cfg).await.unwrap();

        ensure_schema(&mut conn).await.unwrap();
        let first = table_columns(&mut conn, "requests").await.unwrap();

        sqlx::query("INSERT INTO users (user_id, login) VALUES (1, 'login1')")
            .execute(&mut conn)
            .await
            .unwrap();

        ensure_schema(&mut conn).await.unwrap();
        let second = table_columns(&mut conn, "requests").await.unwrap();
        assert_eq!(first, second);

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn users_table_has_collaborator_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = db::connect(&ImportConfig::in_dir(dir.path())).await.unwrap();
        ensure_schema(&mut conn).await.unwrap();

        let cols = table_columns(&mut conn, "users").await.unwrap();
        assert_eq!(
            cols,
            vec![
                "user_id",
                "fio",
                "phone",
                "login",
                "password",
                "user_type",
                "is_active",
                "registration_date"
            ]
        );
        let comments = table_columns(&mut conn, "comments").await.unwrap();
        assert_eq!(comments, vec!["comment_id", "message", "master_id", "request_id"]);
    }

    #[tokio::test]
    async fn is_active_defaults_to_one_and_rejects_null() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = db::connect(&ImportConfig::in_dir(dir.path())).await.unwrap();
        ensure_schema(&mut conn).await.unwrap();

        sqlx::query("INSERT OR REPLACE INTO users (user_id, login) VALUES (1, 'login1')")
            .execute(&mut conn)
            .await
            .unwrap();
        let active: bool = sqlx::query_scalar("SELECT is_active FROM users WHERE user_id = 1")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert!(active);

        let res = sqlx::query("UPDATE users SET is_active = NULL WHERE user_id = 1")
            .execute(&mut conn)
            .await;
        assert!(res.is_err());
    }
}
