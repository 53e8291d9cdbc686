use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record. The password hash never leaves the process in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    pub avatar_url: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
}

/// Storage collaborator for user records. Methods distinguish "no match"
/// (`None`/`false`) from operation failure (`Err`).
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn create(&self, new: NewUser) -> anyhow::Result<User>;
    async fn update(&self, id: Uuid, update: UserUpdate) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_verified, avatar_url, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_verified, avatar_url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_verified, avatar_url, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, avatar_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, is_verified, avatar_url, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.avatar_url)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                avatar_url = COALESCE($5, avatar_url)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.email)
        .bind(update.password_hash)
        .bind(update.avatar_url)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
