//! Genre queries
//!
//! Lookups and inserts take a connection so they can run inside the
//! book-creation transaction.

use sqlx::SqliteConnection;

use crate::{error::AppResult, models::Genre};

/// First genre whose name matches exactly (case-sensitive)
pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Genre>> {
    let genre = sqlx::query_as::<_, Genre>(
        "SELECT id, name FROM genres WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(genre)
}

pub async fn insert(conn: &mut SqliteConnection, name: &str) -> AppResult<Genre> {
    let genre = sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES (?) RETURNING id, name")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(genre)
}

pub async fn link_book(conn: &mut SqliteConnection, genre_id: i64, book_id: i64) -> AppResult<()> {
    sqlx::query("INSERT OR IGNORE INTO genre_book (genre_id, book_id) VALUES (?, ?)")
        .bind(genre_id)
        .bind(book_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
