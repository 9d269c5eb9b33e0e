use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Todo record in `todo_table`. `desc` is a reserved word in SQL, so every
/// query quotes the column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub desc: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl Todo {
    pub async fn list(db: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, "desc", user_id, created_at
            FROM todo_table
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        title: &str,
        desc: &str,
        user_id: Uuid,
    ) -> Result<Todo, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todo_table (title, "desc", user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, "desc", user_id, created_at
            "#,
        )
        .bind(title)
        .bind(desc)
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, "desc", user_id, created_at
            FROM todo_table
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Updates title and desc; `None` when no row has that id.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: &str,
        desc: &str,
    ) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todo_table
            SET title = $2, "desc" = $3
            WHERE id = $1
            RETURNING id, title, "desc", user_id, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(desc)
        .fetch_optional(db)
        .await
    }

    /// Deletes by id; `false` when no row had that id.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM todo_table WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
