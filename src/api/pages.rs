//! Static pages

use axum::response::Html;

use crate::{
    error::AppResult,
    views::{self, InstructionPage},
};

/// Usage instructions
#[utoipa::path(
    get,
    path = "/instruction/",
    tag = "pages",
    responses(
        (status = 200, description = "Instruction page", body = String, content_type = "text/html")
    )
)]
pub async fn instruction() -> AppResult<Html<String>> {
    views::render(&InstructionPage)
}
