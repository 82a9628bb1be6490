//! Song row operations
//!
//! All operations are free functions over a `&SqlitePool`; handlers pass the
//! pool in explicitly rather than reaching for process-wide state.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::Result;

/// A persisted song record
///
/// Serializes with keys in declaration order; `release_date` becomes an
/// ISO-8601 date string or null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub running_time: Option<i64>,
    pub likes: i64,
    pub dislikes: i64,
}

/// A validated song payload that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub running_time: Option<i64>,
    pub likes: i64,
    pub dislikes: i64,
}

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        release_date: row.get("release_date"),
        genre: row.get("genre"),
        running_time: row.get("running_time"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
    }
}

const SONG_COLUMNS: &str =
    "id, title, artist, album, release_date, genre, running_time, likes, dislikes";

/// Load all songs in insertion order
pub async fn list_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("SELECT {} FROM songs ORDER BY id", SONG_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

/// Load one song by id
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(song_from_row))
}

/// Insert a new song; the store assigns the id
pub async fn insert_song(pool: &SqlitePool, song: &NewSong) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, artist, album, release_date, genre, running_time, likes, dislikes)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(song.release_date)
    .bind(&song.genre)
    .bind(song.running_time)
    .bind(song.likes)
    .bind(song.dislikes)
    .execute(pool)
    .await?;

    Ok(Song {
        id: result.last_insert_rowid(),
        title: song.title.clone(),
        artist: song.artist.clone(),
        album: song.album.clone(),
        release_date: song.release_date,
        genre: song.genre.clone(),
        running_time: song.running_time,
        likes: song.likes,
        dislikes: song.dislikes,
    })
}

/// Write back every updatable field of an existing song
///
/// `likes`/`dislikes` are deliberately excluded; they change only through
/// the counter operations below.
pub async fn update_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, artist = ?, album = ?, release_date = ?, genre = ?, running_time = ?
        WHERE id = ?
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(song.release_date)
    .bind(&song.genre)
    .bind(song.running_time)
    .bind(song.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a song; returns false if no row matched
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Increment the like counter and return the updated record
pub async fn increment_likes(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let result = sqlx::query("UPDATE songs SET likes = likes + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_song(pool, id).await
}

/// Decrement the dislike counter and return the updated record
///
/// No floor at zero; the counter may go negative.
pub async fn decrement_dislikes(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let result = sqlx::query("UPDATE songs SET dislikes = dislikes - 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_song(pool, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        crate::db::create_songs_table(&pool)
            .await
            .expect("Failed to create schema");
        pool
    }

    fn sample_song() -> NewSong {
        NewSong {
            title: "Go Your Own Way".to_string(),
            artist: "Fleetwood Mac".to_string(),
            album: "Rumours".to_string(),
            release_date: NaiveDate::from_ymd_opt(1977, 2, 4),
            genre: Some("Rock".to_string()),
            running_time: Some(223),
            likes: 0,
            dislikes: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_song() {
        let pool = test_pool().await;

        let inserted = insert_song(&pool, &sample_song()).await.expect("insert");
        assert!(inserted.id > 0);

        let loaded = get_song(&pool, inserted.id)
            .await
            .expect("get")
            .expect("song should exist");
        assert_eq!(loaded, inserted);
        assert_eq!(loaded.release_date, NaiveDate::from_ymd_opt(1977, 2, 4));
    }

    #[tokio::test]
    async fn test_get_missing_song() {
        let pool = test_pool().await;
        assert!(get_song(&pool, 42).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_update_song() {
        let pool = test_pool().await;
        let mut song = insert_song(&pool, &sample_song()).await.expect("insert");

        song.genre = Some("Soft Rock".to_string());
        song.release_date = None;
        update_song(&pool, &song).await.expect("update");

        let loaded = get_song(&pool, song.id).await.expect("get").expect("exists");
        assert_eq!(loaded.genre.as_deref(), Some("Soft Rock"));
        assert_eq!(loaded.release_date, None);
        assert_eq!(loaded.title, "Go Your Own Way");
    }

    #[tokio::test]
    async fn test_delete_song() {
        let pool = test_pool().await;
        let song = insert_song(&pool, &sample_song()).await.expect("insert");

        assert!(delete_song(&pool, song.id).await.expect("delete"));
        assert!(get_song(&pool, song.id).await.expect("get").is_none());
        // Second delete finds nothing
        assert!(!delete_song(&pool, song.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn test_like_and_dislike_counters() {
        let pool = test_pool().await;
        let song = insert_song(&pool, &sample_song()).await.expect("insert");

        let liked = increment_likes(&pool, song.id)
            .await
            .expect("like")
            .expect("exists");
        assert_eq!(liked.likes, 1);
        assert_eq!(liked.dislikes, 0);

        // No floor: dislikes go negative from zero
        let disliked = decrement_dislikes(&pool, song.id)
            .await
            .expect("dislike")
            .expect("exists");
        assert_eq!(disliked.dislikes, -1);

        assert!(increment_likes(&pool, 9999).await.expect("like").is_none());
        assert!(decrement_dislikes(&pool, 9999)
            .await
            .expect("dislike")
            .is_none());
    }
}
