//! songbook library - song record management service
//!
//! Maps HTTP requests onto CRUD and like/dislike operations over a single
//! `songs` table. The binary in `main.rs` wires this router to a TCP listener.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;

pub use error::{Error, Result};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// The `/api/songs_like` and `/api/songs_dislike` routes preserve the
/// historical path shape for existing clients; they are bound to the same
/// handlers as the canonical `/api/songs/:id` routes with the same
/// method-to-operation mapping.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch};

    Router::new()
        .route(
            "/api/songs",
            get(api::songs::list_songs).post(api::songs::create_song),
        )
        .route(
            "/api/songs/:id",
            get(api::song::get_song)
                .put(api::song::update_song)
                .delete(api::song::delete_song),
        )
        .route("/api/songs/:id/like", patch(api::reactions::like_song))
        .route("/api/songs/:id/dislike", patch(api::reactions::dislike_song))
        // Historical route shape
        .route(
            "/api/songs_like/:id",
            get(api::song::get_song)
                .put(api::song::update_song)
                .delete(api::song::delete_song)
                .patch(api::reactions::like_song),
        )
        .route(
            "/api/songs_dislike/:id",
            patch(api::reactions::dislike_song),
        )
        .merge(api::health::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
