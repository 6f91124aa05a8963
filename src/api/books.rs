//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};

use crate::{
    error::AppResult,
    models::{CreateBookForm, NewBook},
    views::{self, BookPage, CreatePage, IndexPage},
};

/// List all books
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    responses(
        (status = 200, description = "Catalog page", body = String, content_type = "text/html")
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    views::render(&IndexPage { books: &books })
}

/// Get book details by exact title
#[utoipa::path(
    get,
    path = "/get/{title}/",
    tag = "books",
    params(("title" = String, Path, description = "Exact book title")),
    responses(
        (status = 200, description = "Book detail page", body = String, content_type = "text/html"),
        (status = 404, description = "No book with this title")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(title): Path<String>,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(&title).await?;
    views::render(&BookPage { book: &book })
}

/// Book creation form
#[utoipa::path(
    get,
    path = "/add",
    tag = "books",
    responses(
        (status = 200, description = "Creation form", body = String, content_type = "text/html")
    )
)]
pub async fn create_form() -> AppResult<Html<String>> {
    views::render(&CreatePage)
}

/// Create a book, creating missing authors and genres on the way
#[utoipa::path(
    post,
    path = "/add",
    tag = "books",
    request_body(content = CreateBookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirect to the catalog"),
        (status = 400, description = "Publication year is not an integer"),
        (status = 409, description = "A book with this title already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Form(form): Form<CreateBookForm>,
) -> AppResult<Redirect> {
    let new_book = NewBook::try_from(form)?;
    state.services.catalog.create_book(&new_book).await?;
    Ok(Redirect::to("/"))
}
