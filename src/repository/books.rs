//! Book queries

use std::collections::HashMap;

use sqlx::{Row, SqliteConnection};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Genre},
};

impl Repository {
    /// List every book with its authors and genres, in storage order
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let mut books = sqlx::query_as::<_, Book>(
            "SELECT id, title, description, publ_year FROM books",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut authors = self.books_authors_by_book(None).await?;
        let mut genres = self.books_genres_by_book(None).await?;

        for book in &mut books {
            book.authors = authors.remove(&book.id).unwrap_or_default();
            book.genres = genres.remove(&book.id).unwrap_or_default();
        }

        Ok(books)
    }

    /// Get the first book with exactly this title
    pub async fn books_get_by_title(&self, title: &str) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, description, publ_year FROM books WHERE title = ? ORDER BY id LIMIT 1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book \"{}\" not found", title)))?;

        book.authors = self
            .books_authors_by_book(Some(book.id))
            .await?
            .remove(&book.id)
            .unwrap_or_default();
        book.genres = self
            .books_genres_by_book(Some(book.id))
            .await?
            .remove(&book.id)
            .unwrap_or_default();

        Ok(book)
    }

    /// Authors grouped by book id, for one book or all of them
    async fn books_authors_by_book(&self, book_id: Option<i64>) -> AppResult<HashMap<i64, Vec<Author>>> {
        let rows = sqlx::query(
            r#"
            SELECT ab.book_id, a.id, a.name, a.bio
            FROM author_book ab
            JOIN authors a ON a.id = ab.author_id
            WHERE ?1 IS NULL OR ab.book_id = ?1
            ORDER BY a.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Author>> = HashMap::new();
        for r in rows {
            grouped.entry(r.get("book_id")).or_default().push(Author {
                id: r.get("id"),
                name: r.get("name"),
                bio: r.get("bio"),
                books: Vec::new(),
            });
        }
        Ok(grouped)
    }

    /// Genres grouped by book id, for one book or all of them
    async fn books_genres_by_book(&self, book_id: Option<i64>) -> AppResult<HashMap<i64, Vec<Genre>>> {
        let rows = sqlx::query(
            r#"
            SELECT gb.book_id, g.id, g.name
            FROM genre_book gb
            JOIN genres g ON g.id = gb.genre_id
            WHERE ?1 IS NULL OR gb.book_id = ?1
            ORDER BY g.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Genre>> = HashMap::new();
        for r in rows {
            grouped.entry(r.get("book_id")).or_default().push(Genre {
                id: r.get("id"),
                name: r.get("name"),
            });
        }
        Ok(grouped)
    }
}

/// Insert the book row and return its id
pub async fn insert(
    conn: &mut SqliteConnection,
    title: &str,
    description: &str,
    publ_year: i64,
) -> AppResult<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO books (title, description, publ_year) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(description)
    .bind(publ_year)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, format!("A book titled \"{}\" already exists", title)))
}
