use serde::Deserialize;

/// Body for `/marks/add` and `/marks/update`. The owner id is never part
/// of the body; it comes from the validated token only.
#[derive(Debug, Deserialize)]
pub struct MovieNoteRequest {
    pub movie_id: i64,
    pub note: f64,
}
