//! Language lookup model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A natural language a book is written in (e.g. English, French, Japanese)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create language request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLanguage {
    pub name: String,
}
