//! Like/dislike endpoints
//!
//! Both are unconditional single-statement counter adjustments; no request
//! body is consumed. The dislike counter has no floor at zero.

use axum::extract::{Path, State};
use axum::Json;

use crate::db::songs::{self, Song};
use crate::error::{Error, Result};
use crate::AppState;

/// PATCH /api/songs/:id/like
pub async fn like_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Song>> {
    songs::increment_likes(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))
}

/// PATCH /api/songs/:id/dislike
pub async fn dislike_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Song>> {
    songs::decrement_dislikes(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))
}
