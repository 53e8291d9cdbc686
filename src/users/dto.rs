use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tv_notes::repo::SeasonNote;
use crate::users::repo::User;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// All fields optional; absent ones are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar_url: Option<String>,
}

/// The part of a user that may leave the process.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub avatar_url: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            is_verified: u.is_verified,
            avatar_url: u.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MovieNoteItem {
    pub movie_id: i64,
    pub note: f64,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: f64,
}

#[derive(Debug, Serialize)]
pub struct TvShowNotesItem {
    pub tvshow_id: i64,
    pub notes: Vec<SeasonNote>,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<SeasonNote>,
}
