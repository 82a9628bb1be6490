//! Item endpoints: fetch, partial update, delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::db::songs::{self, Song};
use crate::error::{Error, Result};
use crate::AppState;

/// Partial update request for PUT /api/songs/:id
///
/// Fields whose keys are absent from the body are left untouched. For the
/// nullable columns the double `Option` distinguishes an absent key from an
/// explicit null, so a client can clear `release_date`, `genre`, or
/// `running_time`. `likes`/`dislikes` are not updatable here; unknown keys
/// are ignored.
#[derive(Debug, Deserialize)]
pub struct SongUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    #[serde(default, deserialize_with = "key_present")]
    pub release_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "key_present")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "key_present")]
    pub running_time: Option<Option<i64>>,
}

/// Wraps the deserialized value in an outer `Some` so that a present key is
/// distinguishable from a missing one (`#[serde(default)]` yields `None`).
fn key_present<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SongUpdate {
    /// Overwrite exactly the fields whose keys were present in the request
    pub fn apply(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if let Some(album) = self.album {
            song.album = album;
        }
        if let Some(release_date) = self.release_date {
            song.release_date = release_date;
        }
        if let Some(genre) = self.genre {
            song.genre = genre;
        }
        if let Some(running_time) = self.running_time {
            song.running_time = running_time;
        }
    }
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Song>> {
    songs::get_song(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))
}

/// PUT /api/songs/:id
///
/// Read-modify-write: loads the record, applies the present fields, writes
/// every updatable column back. No field validation on this path.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<SongUpdate>,
) -> Result<Json<Song>> {
    let mut song = songs::get_song(&state.db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))?;

    changes.apply(&mut song);
    songs::update_song(&state.db, &song).await?;

    Ok(Json(song))
}

/// DELETE /api/songs/:id
///
/// Removes the record permanently; a repeat call returns 404, not 204.
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if songs::delete_song(&state.db, id).await? {
        info!("Deleted song {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound(format!("song {}", id)))
    }
}
