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
    movie_notes::dto::MovieNoteRequest,
    movie_notes::repo::MovieNote,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all))
        .route("/:movie_id", get(get_note))
        .route("/add", post(add_note))
        .route("/update", post(update_note))
        .route("/delete/:movie_id", post(delete_note))
}

#[instrument(skip(state))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<MovieNote>>, ApiError> {
    let notes = state.movie_notes.list_all().await?;
    Ok(Json(notes))
}

#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let note = state
        .movie_notes
        .find(user_id, movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie note not found".into()))?;
    Ok(Json(serde_json::json!({ "note": note.note })))
}

#[instrument(skip(state, payload))]
pub async fn add_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<MovieNoteRequest>,
) -> Result<(StatusCode, Json<MovieNote>), ApiError> {
    let created = state
        .movie_notes
        .insert(user_id, payload.movie_id, payload.note)
        .await?
        .ok_or_else(|| ApiError::Conflict("Movie note already exists".into()))?;
    info!(user_id = %user_id, movie_id = payload.movie_id, "movie note created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<MovieNoteRequest>,
) -> Result<(StatusCode, Json<MovieNote>), ApiError> {
    let matched = state
        .movie_notes
        .update_note(user_id, payload.movie_id, payload.note)
        .await?;
    if !matched {
        return Err(ApiError::NotFound("Movie note not found".into()));
    }
    info!(user_id = %user_id, movie_id = payload.movie_id, "movie note updated");
    Ok((
        StatusCode::CREATED,
        Json(MovieNote {
            movie_id: payload.movie_id,
            user_id,
            note: payload.note,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.movie_notes.delete(user_id, movie_id).await? {
        return Err(ApiError::NotFound("Movie note not found".into()));
    }
    info!(user_id = %user_id, movie_id, "movie note deleted");
    Ok(Json(serde_json::json!({ "message": "Movie note deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn add(state: &AppState, user: Uuid, movie_id: i64, note: f64) -> MovieNote {
        let (status, Json(created)) = add_note(
            State(state.clone()),
            AuthUser(user),
            ValidJson(MovieNoteRequest { movie_id, note }),
        )
        .await
        .expect("add note");
        assert_eq!(status, StatusCode::CREATED);
        created
    }

    #[tokio::test]
    async fn second_create_for_same_pair_conflicts() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 42, 8.0).await;

        let err = add_note(
            State(state.clone()),
            AuthUser(alice),
            ValidJson(MovieNoteRequest {
                movie_id: 42,
                note: 5.0,
            }),
        )
        .await
        .expect_err("duplicate");
        assert!(matches!(err, ApiError::Conflict(_)));

        // the first note is untouched
        let Json(body) = get_note(State(state.clone()), AuthUser(alice), Path(42))
            .await
            .expect("read back");
        assert_eq!(body["note"], 8.0);
    }

    #[tokio::test]
    async fn same_movie_different_owner_is_independent() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        add(&state, alice, 42, 8.0).await;
        add(&state, bob, 42, 3.0).await;

        let Json(body) = get_note(State(state.clone()), AuthUser(bob), Path(42))
            .await
            .expect("bob's note");
        assert_eq!(body["note"], 3.0);
    }

    #[tokio::test]
    async fn other_users_cannot_see_or_mutate_a_note() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        add(&state, alice, 42, 8.0).await;

        let err = get_note(State(state.clone()), AuthUser(bob), Path(42))
            .await
            .expect_err("invisible to bob");
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = update_note(
            State(state.clone()),
            AuthUser(bob),
            ValidJson(MovieNoteRequest {
                movie_id: 42,
                note: 1.0,
            }),
        )
        .await
        .expect_err("not bob's to update");
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = delete_note(State(state.clone()), AuthUser(bob), Path(42))
            .await
            .expect_err("not bob's to delete");
        assert!(matches!(err, ApiError::NotFound(_)));

        // alice's note survived all of it
        let Json(body) = get_note(State(state.clone()), AuthUser(alice), Path(42))
            .await
            .expect("still there");
        assert_eq!(body["note"], 8.0);
    }

    #[tokio::test]
    async fn update_of_absent_note_is_not_found() {
        let state = AppState::fake();
        let err = update_note(
            State(state.clone()),
            AuthUser(Uuid::new_v4()),
            ValidJson(MovieNoteRequest {
                movie_id: 99,
                note: 4.0,
            }),
        )
        .await
        .expect_err("nothing to update");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_the_note_value() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 42, 8.0).await;

        let (status, _) = update_note(
            State(state.clone()),
            AuthUser(alice),
            ValidJson(MovieNoteRequest {
                movie_id: 42,
                note: 6.5,
            }),
        )
        .await
        .expect("update");
        assert_eq!(status, StatusCode::CREATED);

        let Json(body) = get_note(State(state.clone()), AuthUser(alice), Path(42))
            .await
            .expect("read back");
        assert_eq!(body["note"], 6.5);
    }

    #[tokio::test]
    async fn delete_then_read_is_not_found() {
        let state = AppState::fake();
        let alice = Uuid::new_v4();
        add(&state, alice, 42, 8.0).await;

        delete_note(State(state.clone()), AuthUser(alice), Path(42))
            .await
            .expect("delete");

        let err = get_note(State(state.clone()), AuthUser(alice), Path(42))
            .await
            .expect_err("gone");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn public_listing_returns_everything() {
        let state = AppState::fake();
        add(&state, Uuid::new_v4(), 1, 5.0).await;
        add(&state, Uuid::new_v4(), 2, 7.0).await;

        let Json(all) = list_all(State(state.clone())).await.expect("list");
        assert_eq!(all.len(), 2);
    }
}
