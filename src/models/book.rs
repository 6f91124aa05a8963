//! Book model and the creation form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, genre::Genre};
use crate::error::AppError;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub publ_year: Option<i64>,
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Author names joined for display
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Genre names joined for display
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw `POST /add` form body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookForm {
    pub title: String,
    /// Comma-separated genre names
    pub genre_title: String,
    /// Comma-separated author names
    pub author_name: String,
    /// Publication year, parsed as an integer
    pub publ_year: String,
    pub description: String,
}

/// Book creation request after form coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    /// Stored as submitted, including an empty string
    pub description: String,
    pub publ_year: i64,
    pub genre_names: Vec<String>,
    pub author_names: Vec<String>,
}

/// Split a comma-separated list, trimming each entry.
///
/// Empty entries are kept, so an empty input yields a single empty name.
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).collect()
}

impl TryFrom<CreateBookForm> for NewBook {
    type Error = AppError;

    fn try_from(form: CreateBookForm) -> Result<Self, Self::Error> {
        let publ_year = form.publ_year.trim().parse::<i64>().map_err(|_| {
            AppError::Validation(format!("Invalid publication year: {:?}", form.publ_year))
        })?;

        Ok(Self {
            title: form.title,
            description: form.description,
            publ_year,
            genre_names: split_names(&form.genre_title),
            author_names: split_names(&form.author_name),
        })
    }
}
