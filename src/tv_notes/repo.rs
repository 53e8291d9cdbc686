use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

/// One season's note inside a show document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonNote {
    pub season: i32,
    pub note: f64,
}

/// A user's notes on one show, one entry per rated season. The `notes`
/// array is replaced wholesale on update, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TvShowNote {
    pub serie_id: i64,
    pub user_id: Uuid,
    pub notes: Json<Vec<SeasonNote>>,
}

#[async_trait]
pub trait TvShowNoteStore: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<TvShowNote>>;
    async fn find(&self, user_id: Uuid, serie_id: i64) -> anyhow::Result<Option<TvShowNote>>;
    /// Atomic conditional insert; `None` means a document for this
    /// (user, show) pair already exists.
    async fn insert(
        &self,
        user_id: Uuid,
        serie_id: i64,
        notes: Vec<SeasonNote>,
    ) -> anyhow::Result<Option<TvShowNote>>;
    /// Wholesale replacement of the season notes; `false` means no
    /// matching document.
    async fn update_notes(
        &self,
        user_id: Uuid,
        serie_id: i64,
        notes: Vec<SeasonNote>,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, user_id: Uuid, serie_id: i64) -> anyhow::Result<bool>;
}

pub struct PgTvShowNoteStore {
    db: PgPool,
}

impl PgTvShowNoteStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TvShowNoteStore for PgTvShowNoteStore {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<TvShowNote>> {
        let rows = sqlx::query_as::<_, TvShowNote>(
            "SELECT serie_id, user_id, notes FROM tvshow_notes WHERE user_id = $1 ORDER BY serie_id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, serie_id: i64) -> anyhow::Result<Option<TvShowNote>> {
        let row = sqlx::query_as::<_, TvShowNote>(
            "SELECT serie_id, user_id, notes FROM tvshow_notes WHERE user_id = $1 AND serie_id = $2",
        )
        .bind(user_id)
        .bind(serie_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn insert(
        &self,
        user_id: Uuid,
        serie_id: i64,
        notes: Vec<SeasonNote>,
    ) -> anyhow::Result<Option<TvShowNote>> {
        let row = sqlx::query_as::<_, TvShowNote>(
            r#"
            INSERT INTO tvshow_notes (user_id, serie_id, notes)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, serie_id) DO NOTHING
            RETURNING serie_id, user_id, notes
            "#,
        )
        .bind(user_id)
        .bind(serie_id)
        .bind(Json(notes))
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update_notes(
        &self,
        user_id: Uuid,
        serie_id: i64,
        notes: Vec<SeasonNote>,
    ) -> anyhow::Result<bool> {
        let result =
            sqlx::query("UPDATE tvshow_notes SET notes = $3 WHERE user_id = $1 AND serie_id = $2")
                .bind(user_id)
                .bind(serie_id)
                .bind(Json(notes))
                .execute(&self.db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: Uuid, serie_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM tvshow_notes WHERE user_id = $1 AND serie_id = $2")
            .bind(user_id)
            .bind(serie_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
