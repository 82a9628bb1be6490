//! Collection endpoints: list all songs, create a song

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::validate;
use crate::db::songs::{self, Song};
use crate::error::{Error, Result};
use crate::AppState;

/// Response for GET /api/songs
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub songs: Vec<Song>,
    /// Sum of all running times, reported in minutes
    pub total_running_time: f64,
}

/// GET /api/songs
///
/// Returns every record (full table scan by design) plus the total running
/// time in minutes, rounded to 2 decimal places. Records without a running
/// time contribute zero to the total.
pub async fn list_songs(State(state): State<AppState>) -> Result<Json<SongListResponse>> {
    let songs = songs::list_songs(&state.db).await?;

    let total_seconds: i64 = songs.iter().filter_map(|s| s.running_time).sum();
    let total_running_time = (total_seconds as f64 / 60.0 * 100.0).round() / 100.0;

    Ok(Json(SongListResponse {
        songs,
        total_running_time,
    }))
}

/// POST /api/songs
///
/// Validates the body, persists a new record (store assigns the id), and
/// returns it with 201. A validation failure returns 400 with the
/// field-to-message mapping as the body; nothing is written.
pub async fn create_song(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Song>)> {
    let new_song = validate::parse_new_song(&body).map_err(Error::Validation)?;

    let song = songs::insert_song(&state.db, &new_song).await?;
    info!("Created song {}: {} - {}", song.id, song.artist, song.title);

    Ok((StatusCode::CREATED, Json(song)))
}
