use serde::Deserialize;

use crate::tv_notes::repo::SeasonNote;

/// Body for `/marksTV/add/:serie_id` and `/marksTV/update/:serie_id`.
/// The whole season array is submitted each time; updates replace it
/// wholesale.
#[derive(Debug, Deserialize)]
pub struct TvShowNotesRequest {
    pub notes: Vec<SeasonNote>,
}
