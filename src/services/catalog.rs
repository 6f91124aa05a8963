//! Catalog management service

use sqlx::SqliteConnection;

use crate::{
    error::AppResult,
    models::{Author, Book, Genre, NewBook},
    repository::{authors, books, genres, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books with their authors and genres
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    /// Book by exact title, `NotFound` when absent
    pub async fn get_book(&self, title: &str) -> AppResult<Book> {
        self.repository.books_get_by_title(title).await
    }

    /// All authors with the titles of their books
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    /// Create a book, reusing authors and genres that already exist by name.
    ///
    /// Everything runs in one transaction: on any error nothing is written.
    /// Name lookups happen inside the transaction, so a name repeated in the
    /// same request resolves to the row inserted for its first occurrence.
    /// Two concurrent requests may still both insert the same new name.
    pub async fn create_book(&self, new_book: &NewBook) -> AppResult<i64> {
        let mut tx = self.repository.pool.begin().await?;

        let mut genre_ids = Vec::with_capacity(new_book.genre_names.len());
        for name in &new_book.genre_names {
            genre_ids.push(find_or_create_genre(&mut tx, name).await?.id);
        }

        let mut author_ids = Vec::with_capacity(new_book.author_names.len());
        for name in &new_book.author_names {
            author_ids.push(find_or_create_author(&mut tx, name).await?.id);
        }

        let book_id = books::insert(
            &mut tx,
            &new_book.title,
            &new_book.description,
            new_book.publ_year,
        )
        .await?;

        for author_id in author_ids {
            authors::link_book(&mut tx, author_id, book_id).await?;
        }
        for genre_id in genre_ids {
            genres::link_book(&mut tx, genre_id, book_id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Catalog: created book id={} title={:?} ({} author(s), {} genre(s))",
            book_id,
            new_book.title,
            new_book.author_names.len(),
            new_book.genre_names.len()
        );

        Ok(book_id)
    }
}

async fn find_or_create_genre(conn: &mut SqliteConnection, name: &str) -> AppResult<Genre> {
    if let Some(genre) = genres::find_by_name(conn, name).await? {
        return Ok(genre);
    }
    let genre = genres::insert(conn, name).await?;
    tracing::debug!("Catalog: new genre id={} name={:?}", genre.id, genre.name);
    Ok(genre)
}

async fn find_or_create_author(conn: &mut SqliteConnection, name: &str) -> AppResult<Author> {
    if let Some(author) = authors::find_by_name(conn, name).await? {
        return Ok(author);
    }
    let author = authors::insert(conn, name).await?;
    tracing::debug!("Catalog: new author id={} name={:?}", author.id, author.name);
    Ok(author)
}
