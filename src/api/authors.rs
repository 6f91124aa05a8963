//! Author endpoints

use axum::{extract::State, response::Html};

use crate::{
    error::AppResult,
    views::{self, AuthorsPage},
};

/// List all authors
#[utoipa::path(
    get,
    path = "/author/",
    tag = "authors",
    responses(
        (status = 200, description = "Author list page", body = String, content_type = "text/html")
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Html<String>> {
    let authors = state.services.catalog.list_authors().await?;
    views::render(&AuthorsPage { authors: &authors })
}
