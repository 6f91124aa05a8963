//! Author queries

use std::collections::HashMap;

use sqlx::{Row, SqliteConnection};

use super::Repository;
use crate::{error::AppResult, models::Author};

impl Repository {
    /// List all authors with the titles of their books
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let mut authors = sqlx::query_as::<_, Author>("SELECT id, name, bio FROM authors")
            .fetch_all(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT ab.author_id, b.title
            FROM author_book ab
            JOIN books b ON b.id = ab.book_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut titles: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            titles
                .entry(row.get("author_id"))
                .or_default()
                .push(row.get("title"));
        }

        for author in &mut authors {
            author.books = titles.remove(&author.id).unwrap_or_default();
        }

        Ok(authors)
    }
}

/// First author whose name matches exactly (case-sensitive)
pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Author>> {
    let author = sqlx::query_as::<_, Author>(
        "SELECT id, name, bio FROM authors WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(author)
}

pub async fn insert(conn: &mut SqliteConnection, name: &str) -> AppResult<Author> {
    let author = sqlx::query_as::<_, Author>(
        "INSERT INTO authors (name) VALUES (?) RETURNING id, name, bio",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(author)
}

pub async fn link_book(conn: &mut SqliteConnection, author_id: i64, book_id: i64) -> AppResult<()> {
    sqlx::query("INSERT OR IGNORE INTO author_book (author_id, book_id) VALUES (?, ?)")
        .bind(author_id)
        .bind(book_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
