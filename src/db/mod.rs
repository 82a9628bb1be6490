//! Database access layer for songbook

use crate::error::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

pub mod songs;

/// Initialize database connection and create the schema if needed
///
/// Accepts an sqlx SQLite connection string, e.g.
/// `sqlite://songbook.db?mode=rwc` or `sqlite::memory:`.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    // Idempotent - safe to call on every startup
    create_songs_table(&pool).await?;

    info!("Database schema ready");

    Ok(pool)
}

/// Create the songs table (idempotent)
///
/// Length and sign rules mirror the validation applied at create time, so a
/// row can only violate them through the unvalidated update path.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT NOT NULL,
            release_date TEXT,
            genre TEXT,
            running_time INTEGER,
            likes INTEGER NOT NULL DEFAULT 0,
            dislikes INTEGER NOT NULL DEFAULT 0,
            CHECK (length(title) <= 200),
            CHECK (length(artist) <= 200),
            CHECK (length(album) <= 200),
            CHECK (genre IS NULL OR length(genre) <= 200),
            CHECK (running_time IS NULL OR running_time >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::songs::{insert_song, list_songs, NewSong};

    #[tokio::test]
    async fn test_init_database_creates_schema() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}/songbook.db?mode=rwc", dir.path().display());

        let pool = init_database(&db_url).await.expect("Failed to initialize");

        let song = NewSong {
            title: "Dreams".to_string(),
            artist: "Fleetwood Mac".to_string(),
            album: "Rumours".to_string(),
            release_date: None,
            genre: None,
            running_time: Some(257),
            likes: 0,
            dislikes: 0,
        };
        insert_song(&pool, &song).await.expect("Failed to insert");
        pool.close().await;

        // Re-initialization must not disturb existing data
        let pool = init_database(&db_url).await.expect("Failed to re-initialize");
        let songs = list_songs(&pool).await.expect("Failed to list");
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Dreams");
    }
}
