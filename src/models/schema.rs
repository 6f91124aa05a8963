//! Serialization schemas for structured output
//!
//! Flat mirrors of the models. `BookSchema` carries the ids of its
//! related authors and genres instead of nested objects.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Author, Book, Genre};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorSchema {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenreSchema {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookSchema {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub publ_year: Option<i64>,
    pub author_ids: Vec<i64>,
    pub genre_ids: Vec<i64>,
}

impl From<&Author> for AuthorSchema {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            bio: author.bio.clone(),
        }
    }
}

impl From<&Genre> for GenreSchema {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

impl From<&Book> for BookSchema {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            publ_year: book.publ_year,
            author_ids: book.authors.iter().map(|a| a.id).collect(),
            genre_ids: book.genres.iter().map(|g| g.id).collect(),
        }
    }
}
