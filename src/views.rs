//! HTML page templates
//!
//! Compiled from the files under `templates/`.

use askama::Template;
use axum::response::Html;

use crate::{
    error::AppResult,
    models::{Author, Book},
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub books: &'a [Book],
}

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookPage<'a> {
    pub book: &'a Book,
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePage;

#[derive(Template)]
#[template(path = "author.html")]
pub struct AuthorsPage<'a> {
    pub authors: &'a [Author],
}

#[derive(Template)]
#[template(path = "instruction.html")]
pub struct InstructionPage;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub code: u16,
    pub reason: &'a str,
    pub message: &'a str,
}

/// Render a page into an HTML response
pub fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    Ok(Html(page.render()?))
}
