use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
    },
    error::ApiError,
    extract::ValidJson,
    state::AppState,
    users::dto::{
        CreateUserRequest, LoginRequest, MovieNoteItem, NoteResponse, NotesResponse,
        ProfileResponse, PublicUser, TokenResponse, TvShowNotesItem, UpdateUserRequest,
    },
    users::repo::{NewUser, UserUpdate},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/createUser", post(create_user))
        .route("/login", post(login))
        .route("/profil", post(profil))
        .route("/updateUser", post(update_user))
        .route("/deleteUser", post(delete_user))
        .route("/getMoviesNotes", get(get_movies_notes))
        .route("/getMovieNote/:movie_id", get(get_movie_note))
        .route("/getTvShowsNotes", get(get_tvshows_notes))
        .route("/getTvShowNote/:serie_id", get(get_tvshow_note))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    if state.users.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = state
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash: hash,
            avatar_url: payload.avatar_url,
        })
        .await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials".into()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn profil(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(ProfileResponse {
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<UpdateUserRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if let Some(email) = &payload.email {
        if !is_valid_email(email.trim()) {
            return Err(ApiError::BadRequest("Invalid email".into()));
        }
    }

    let password_hash = match &payload.password {
        Some(plain) => {
            if plain.len() < 8 {
                return Err(ApiError::BadRequest("Password too short".into()));
            }
            Some(hash_password(plain)?)
        }
        None => None,
    };

    let matched = state
        .users
        .update(
            user_id,
            UserUpdate {
                name: payload.name,
                email: payload.email.map(|e| e.trim().to_lowercase()),
                password_hash,
                avatar_url: payload.avatar_url,
            },
        )
        .await?;

    if !matched {
        return Err(ApiError::NotFound("User not found".into()));
    }
    info!(user_id = %user_id, "user updated");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "User updated" })),
    ))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.users.delete(user_id).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }
    info!(user_id = %user_id, "user deleted");
    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

#[instrument(skip(state))]
pub async fn get_movies_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MovieNoteItem>>, ApiError> {
    let notes = state.movie_notes.list_for_user(user_id).await?;
    Ok(Json(
        notes
            .into_iter()
            .map(|n| MovieNoteItem {
                movie_id: n.movie_id,
                note: n.note,
            })
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_movie_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<i64>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state
        .movie_notes
        .find(user_id, movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie note not found".into()))?;
    Ok(Json(NoteResponse { note: note.note }))
}

#[instrument(skip(state))]
pub async fn get_tvshows_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TvShowNotesItem>>, ApiError> {
    let notes = state.tv_notes.list_for_user(user_id).await?;
    Ok(Json(
        notes
            .into_iter()
            .map(|n| TvShowNotesItem {
                tvshow_id: n.serie_id,
                notes: n.notes.0,
            })
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_tvshow_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(serie_id): Path<i64>,
) -> Result<Json<NotesResponse>, ApiError> {
    let note = state
        .tv_notes
        .find(user_id, serie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tvshow note not found".into()))?;
    Ok(Json(NotesResponse { notes: note.notes.0 }))
}
