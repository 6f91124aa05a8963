//! HTTP handlers and routing for Bookservice

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{
    http::Uri,
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Catalog
        .route("/", get(books::list_books))
        .route("/get/:title/", get(books::get_book))
        .route("/get/:title", get(add_trailing_slash))
        .route("/add", get(books::create_form).post(books::create_book))
        // Authors
        .route("/author/", get(authors::list_authors))
        .route("/author", get(add_trailing_slash))
        // Static pages
        .route("/instruction/", get(pages::instruction))
        .route("/instruction", get(add_trailing_slash))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Redirect `/path` to its canonical `/path/` form, keeping the raw encoding
async fn add_trailing_slash(uri: Uri) -> Redirect {
    Redirect::permanent(&format!("{}/", uri.path()))
}
