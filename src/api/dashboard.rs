//! Dashboard endpoint: catalog summary counts plus the session visit counter

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{AuthenticatedUser, ClientSession};

/// Headline counts of the catalog
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogCounts {
    /// Total number of books
    pub num_books: i64,
    /// Total number of copies
    pub num_copies: i64,
    /// Copies currently available
    pub num_copies_available: i64,
    /// Total number of authors
    pub num_authors: i64,
}

/// Dashboard response
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub counts: CatalogCounts,
    /// Visits this session had made before this one
    pub num_visits: i64,
    /// Session key to send back in the x-session-key header
    pub session_key: String,
}

/// Catalog summary: book/copy/author counts and the per-session visit count
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(
        ("x-session-key" = Option<String>, Header, description = "Opaque session key from a previous response")
    ),
    responses(
        (status = 200, description = "Catalog summary", body = DashboardResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ClientSession(session_key): ClientSession,
) -> AppResult<Json<DashboardResponse>> {
    let counts = state.services.stats.catalog_counts().await?;
    let (session_key, num_visits) = state.services.sessions.record_visit(session_key);

    Ok(Json(DashboardResponse {
        counts,
        num_visits,
        session_key,
    }))
}
