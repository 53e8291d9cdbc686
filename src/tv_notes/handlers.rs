use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    extract::ValidJson,
    state::AppState,
    tv_notes::dto::TvShowNotesRequest,
    tv_notes::repo::TvShowNote,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes))
        .route("/add/:serie_id", post(add_notes))
        .route("/update/:serie_id", post(update_notes))
        .route("/delete/:serie_id", post(delete_notes))
}

#[instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TvShowNote>>, ApiError> {
    let notes = state.tv_notes.list_for_user(user_id).await?;
    Ok(Json(notes))
}

#[instrument(skip(state, payload))]
pub async fn add_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(serie_id): Path<i64>,
    ValidJson(payload): ValidJson<TvShowNotesRequest>,
) -> Result<(StatusCode, Json<TvShowNote>), ApiError> {
    if payload.notes.is_empty() {
        return Err(ApiError::BadRequest("notes must be non-empty".into()));
    }
    let created = state
        .tv_notes
        .insert(user_id, serie_id, payload.notes)
        .await?
        .ok_or_else(|| ApiError::Conflict("Tvshow note already exists".into()))?;
    info!(user_id = %user_id, serie_id, "tvshow note created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(serie_id): Path<i64>,
    ValidJson(payload): ValidJson<TvShowNotesRequest>,
) -> Result<(StatusCode, Json<TvShowNote>), ApiError> {
    if payload.notes.is_empty() {
        return Err(ApiError::BadRequest("notes must be non-empty".into()));
    }
    let matched = state
        .tv_notes
        .update_notes(user_id, serie_id, payload.notes.clone())
        .await?;
    if !matched {
        return Err(ApiError::NotFound("Tvshow note not found".into()));
    }
    info!(user_id = %user_id, serie_id, "tvshow note updated");
    Ok((
        StatusCode::CREATED,
        Json(TvShowNote {
            serie_id,
            user_id,
            notes: sqlx::types::Json(payload.notes),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(serie_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.tv_notes.delete(user_id, serie_id).await? {
        return Err(ApiError::NotFound("Tvshow note not found".into()));
    }
    info!(user_id = %user_id, serie_id, "tvshow note deleted");
    Ok(Json(serde_json::json!({ "message": "Tvshow note deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tv_notes::repo::SeasonNote;
    use uuid::Uuid;

    fn season(season: i32, note: f64) -> SeasonNote {
        SeasonNote { season, note }
    }

    async fn add(state: &AppState, user: Uuid, serie_id: i64, notes: Vec<SeasonNote>) {
        let (status, _) = add_notes(
            State(state.clone()),
            AuthUser(user),
            Path(serie_id),
            ValidJson(TvShowNotesRequest { notes }),
        )
        .await
        .expect("add notes");
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn update_replaces_seasons_wholesale() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 7, vec![season(1, 9.0)]).await;

        update_notes(
            State(state.clone()),
            AuthUser(alice),
            Path(7),
            ValidJson(TvShowNotesRequest {
                notes: vec![season(1, 7.0), season(2, 6.0)],
            }),
        )
        .await
        .expect("update");

        let Json(notes) = list_notes(State(state.clone()), AuthUser(alice))
            .await
            .expect("list");
        assert_eq!(notes.len(), 1);
        // exactly the submitted two-element sequence, no merge with the old one
        assert_eq!(notes[0].notes.0, vec![season(1, 7.0), season(2, 6.0)]);
    }

    #[tokio::test]
    async fn duplicate_add_conflicts() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 7, vec![season(1, 9.0)]).await;

        let err = add_notes(
            State(state.clone()),
            AuthUser(alice),
            Path(7),
            ValidJson(TvShowNotesRequest {
                notes: vec![season(1, 2.0)],
            }),
        )
        .await
        .expect_err("duplicate");
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_of_absent_document_is_not_found() {
        let state = AppState::fake();
        let err = update_notes(
            State(state.clone()),
            AuthUser(Uuid::new_v4()),
            Path(7),
            ValidJson(TvShowNotesRequest {
                notes: vec![season(1, 5.0)],
            }),
        )
        .await
        .expect_err("nothing to update");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_notes_array_is_bad_request() {
        let state = AppState::fake();
        let err = add_notes(
            State(state.clone()),
            AuthUser(Uuid::new_v4()),
            Path(7),
            ValidJson(TvShowNotesRequest { notes: vec![] }),
        )
        .await
        .expect_err("empty body");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn listing_is_scoped_to_owner() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        add(&state, alice, 7, vec![season(1, 9.0)]).await;
        add(&state, bob, 7, vec![season(1, 4.0)]).await;

        let Json(notes) = list_notes(State(state.clone()), AuthUser(alice))
            .await
            .expect("list");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].user_id, alice);
        assert_eq!(notes[0].notes.0, vec![season(1, 9.0)]);
    }

    #[tokio::test]
    async fn delete_then_update_is_not_found() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 7, vec![season(1, 9.0)]).await;

        delete_notes(State(state.clone()), AuthUser(alice), Path(7))
            .await
            .expect("delete");

        let err = update_notes(
            State(state.clone()),
            AuthUser(alice),
            Path(7),
            ValidJson(TvShowNotesRequest {
                notes: vec![season(1, 1.0)],
            }),
        )
        .await
        .expect_err("gone");
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
