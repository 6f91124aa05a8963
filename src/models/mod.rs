//! Data models for Bookservice

pub mod author;
pub mod book;
pub mod genre;
pub mod schema;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, CreateBookForm, NewBook};
pub use genre::Genre;
pub use schema::{AuthorSchema, BookSchema, GenreSchema};
