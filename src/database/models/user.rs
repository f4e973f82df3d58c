use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered chat and the group it is assigned to.
///
/// At most one record exists per chat id; records are never deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub chat_id: i64,
    /// Canonical (uppercased) group name.
    pub group_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT chat_id, group_name, created_at, updated_at FROM users WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts the record or overwrites its group assignment, last write wins.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        group_name: &str,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO users (chat_id, group_name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(chat_id)
            DO UPDATE SET group_name = excluded.group_name, updated_at = excluded.updated_at
            "#,
        )
        .bind(chat_id)
        .bind(group_name)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Every registered user in store order (registration order, then id).
    pub async fn all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT chat_id, group_name, created_at, updated_at FROM users ORDER BY created_at, chat_id",
        )
        .fetch_all(pool)
        .await
    }
}
