use sqlx::SqlitePool;

use crate::comments::repo_types::Comment;

impl Comment {
    pub async fn list_for_request(db: &SqlitePool, request_id: i64) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, message, master_id, request_id
            FROM comments
            WHERE request_id = ?
            ORDER BY comment_id
            "#,
        )
        .bind(request_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &SqlitePool) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(db)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::scratch;

    #[tokio::test]
    async fn comments_are_listed_per_request() {
        let (_dir, _cfg, db) = scratch().await;
        sqlx::query(
            r#"
            INSERT INTO comments (message, master_id, request_id) VALUES
                ('Интересная поломка', 2, 1),
                ('Очень странно, будем разбираться!', 3, 2),
                ('Скорее всего потребуется мотор обдува!', 3, 1)
            "#,
        )
        .execute(&db)
        .await
        .unwrap();

        let for_first = Comment::list_for_request(&db, 1).await.unwrap();
        assert_eq!(for_first.len(), 2);
        assert_eq!(for_first[0].message.as_deref(), Some("Интересная поломка"));
        assert_eq!(Comment::count(&db).await.unwrap(), 3);
        assert!(Comment::list_for_request(&db, 9).await.unwrap().is_empty());
    }
}
