use chrono::{DateTime, Utc};
use sqlx::{query, query_as, Pool, Sqlite};

use crate::model::{storage_timestamp, Todo};

const COLUMNS: &str = "id, user_id, text, done, created_at, updated_at";

/// Record store for the `todos` table.
///
/// Writes report their outcome explicitly: an optional returned row for
/// insert and toggle, an affected-row count for delete.
#[derive(Debug, Clone)]
pub struct TodoStore {
    db: Pool<Sqlite>,
}

impl TodoStore {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    // All rows owned by `user_id`, newest first
    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Todo>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM todos WHERE user_id = ? ORDER BY created_at DESC, rowid DESC"
        );
        query_as::<_, Todo>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM todos WHERE id = ? LIMIT 1");
        query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn insert(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let stamp = storage_timestamp(now);
        let sql = format!(
            "INSERT INTO todos (id, user_id, text, done, created_at, updated_at) \
             VALUES (?, ?, ?, 0, ?, ?) RETURNING {COLUMNS}"
        );
        query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(&stamp)
            .bind(&stamp)
            .fetch_optional(&self.db)
            .await
    }

    /// Flip `done` on the row matching both `id` and `user_id`.
    pub async fn toggle_owned(
        &self,
        id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!(
            "UPDATE todos SET done = NOT done, updated_at = ? \
             WHERE id = ? AND user_id = ? RETURNING {COLUMNS}"
        );
        query_as::<_, Todo>(&sql)
            .bind(storage_timestamp(now))
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
    }

    /// Remove the row matching both `id` and `user_id`, returning rows affected.
    pub async fn delete_owned(&self, id: &str, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
