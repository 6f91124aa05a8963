//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    /// Titles of the books linked to this author, filled on listing only
    #[sqlx(skip)]
    #[serde(default)]
    pub books: Vec<String>,
}
