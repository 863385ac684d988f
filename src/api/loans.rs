//! Loan listing and renewal endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::copy::{Copy, CopyWithBook},
};

use super::AuthenticatedUser;

/// Renewal request: the proposed new due-back date
#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    /// Date between today and four weeks out (default three weeks)
    pub renewal_date: NaiveDate,
}

/// Suggested renewal date for the renewal form
#[derive(Serialize, ToSchema)]
pub struct RenewProposal {
    pub proposed_renewal_date: NaiveDate,
}

/// Copies on loan to the current user, soonest due first
#[utoipa::path(
    get,
    path = "/loans/mine",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user's loans", body = Vec<CopyWithBook>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CopyWithBook>>> {
    let loans = state.services.loans.my_loans(claims.user_id).await?;
    Ok(Json(loans))
}

/// All copies on loan, soonest due first
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All active loans", body = Vec<CopyWithBook>),
        (status = 403, description = "Librarian capability required")
    )
)]
pub async fn all_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CopyWithBook>>> {
    claims.require_librarian()?;

    let loans = state.services.loans.all_loans().await?;
    Ok(Json(loans))
}

/// Suggested renewal date for a copy (three weeks from today)
#[utoipa::path(
    get,
    path = "/copies/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Suggested renewal date", body = RenewProposal),
        (status = 403, description = "Librarian capability required"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renewal_proposal(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewProposal>> {
    claims.require_librarian()?;

    let proposed_renewal_date = state.services.loans.renewal_proposal(id).await?;
    Ok(Json(RenewProposal { proposed_renewal_date }))
}

/// Extend a copy's due date. The date must fall between today and four
/// weeks out; the copy's status is untouched.
#[utoipa::path(
    post,
    path = "/copies/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Due date extended", body = Copy),
        (status = 400, description = "Renewal date out of the allowed window"),
        (status = 403, description = "Librarian capability required"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<Copy>> {
    claims.require_librarian()?;

    let copy = state.services.loans.renew_copy(id, request.renewal_date).await?;
    Ok(Json(copy))
}
