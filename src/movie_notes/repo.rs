use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A user's note on one movie. At most one per (user, movie); the
/// composite primary key enforces that below the application layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieNote {
    pub movie_id: i64,
    pub user_id: Uuid,
    pub note: f64,
}

#[async_trait]
pub trait MovieNoteStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<MovieNote>>;
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<MovieNote>>;
    async fn find(&self, user_id: Uuid, movie_id: i64) -> anyhow::Result<Option<MovieNote>>;
    /// Atomic conditional insert; `None` means a note for this
    /// (user, movie) pair already exists.
    async fn insert(&self, user_id: Uuid, movie_id: i64, note: f64)
        -> anyhow::Result<Option<MovieNote>>;
    /// `false` means no matching row.
    async fn update_note(&self, user_id: Uuid, movie_id: i64, note: f64) -> anyhow::Result<bool>;
    async fn delete(&self, user_id: Uuid, movie_id: i64) -> anyhow::Result<bool>;
}

pub struct PgMovieNoteStore {
    db: PgPool,
}

impl PgMovieNoteStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieNoteStore for PgMovieNoteStore {
    async fn list_all(&self) -> anyhow::Result<Vec<MovieNote>> {
        let rows = sqlx::query_as::<_, MovieNote>(
            "SELECT movie_id, user_id, note FROM movie_notes ORDER BY movie_id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<MovieNote>> {
        let rows = sqlx::query_as::<_, MovieNote>(
            "SELECT movie_id, user_id, note FROM movie_notes WHERE user_id = $1 ORDER BY movie_id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, movie_id: i64) -> anyhow::Result<Option<MovieNote>> {
        let row = sqlx::query_as::<_, MovieNote>(
            "SELECT movie_id, user_id, note FROM movie_notes WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn insert(
        &self,
        user_id: Uuid,
        movie_id: i64,
        note: f64,
    ) -> anyhow::Result<Option<MovieNote>> {
        let row = sqlx::query_as::<_, MovieNote>(
            r#"
            INSERT INTO movie_notes (user_id, movie_id, note)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            RETURNING movie_id, user_id, note
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(note)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update_note(&self, user_id: Uuid, movie_id: i64, note: f64) -> anyhow::Result<bool> {
        let result =
            sqlx::query("UPDATE movie_notes SET note = $3 WHERE user_id = $1 AND movie_id = $2")
                .bind(user_id)
                .bind(movie_id)
                .bind(note)
                .execute(&self.db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: Uuid, movie_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM movie_notes WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
