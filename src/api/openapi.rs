//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::{
    api::{authors, books, health, pages},
    models::{AuthorSchema, BookSchema, CreateBookForm, GenreSchema},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookservice",
        version = "0.1.0",
        description = "Catalog of books, authors and genres",
        license(name = "MIT")
    ),
    paths(
        // Books
        books::list_books,
        books::get_book,
        books::create_form,
        books::create_book,
        // Authors
        authors::list_authors,
        // Pages
        pages::instruction,
        // Health
        health::health_check,
        health::readiness_check
    ),
    components(schemas(
        AuthorSchema,
        GenreSchema,
        BookSchema,
        CreateBookForm,
        health::HealthResponse
    )),
    tags(
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors"),
        (name = "pages", description = "Static pages"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
