use sqlx::SqlitePool;

use crate::users::repo_types::User;

const USER_COLUMNS: &str =
    "user_id, fio, phone, login, password, user_type, is_active, registration_date";

impl User {
    pub async fn find_by_id(db: &SqlitePool, user_id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Match login and password against active users only.
    pub async fn authenticate(
        db: &SqlitePool,
        login: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE login = ? AND password = ? AND is_active = 1
            "#
        ))
        .bind(login)
        .bind(password)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Returns false when no such user exists.
    pub async fn set_active(db: &SqlitePool, user_id: i64, active: bool) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET is_active = ? WHERE user_id = ?")
            .bind(active)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn count(db: &SqlitePool) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(n)
    }
}
