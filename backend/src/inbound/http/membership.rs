//! Membership transition HTTP handlers.
//!
//! ```text
//! POST /api/v1/applications/{id}/accept
//! POST /api/v1/applications/{id}/reject
//! POST /api/v1/members/{id}/promote
//! POST /api/v1/officers/{id}/demote
//! POST /api/v1/officers/{id}/transfer-ownership
//! ```
//!
//! Every endpoint returns the refreshed target summary plus the role the
//! actor holds afterwards, so clients can re-render both sides of the
//! transition without a second round trip.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::TransitionReceipt;
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::AccountSummaryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_account_id};

const TARGET_ID_FIELD: FieldName = FieldName::new("id");

/// Path parameters for transition targets.
#[derive(Debug, Deserialize)]
pub struct TargetPath {
    id: String,
}

/// Response payload for a committed membership transition.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub target: AccountSummaryResponse,
    pub actor_role: String,
}

impl From<TransitionReceipt> for TransitionResponse {
    fn from(receipt: TransitionReceipt) -> Self {
        Self {
            target: AccountSummaryResponse::from(&receipt.target),
            actor_role: receipt.actor_role.to_string(),
        }
    }
}

/// Accept a pending application, making the applicant a member.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{id}/accept",
    params(
        ("id" = String, Path, description = "Applicant account identifier")
    ),
    responses(
        (status = 200, description = "Application accepted", body = TransitionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Officer role required or target not pending", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["membership"],
    operation_id = "acceptApplication"
)]
#[post("/applications/{id}/accept")]
pub async fn accept_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TargetPath>,
) -> ApiResult<web::Json<TransitionResponse>> {
    let actor = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, TARGET_ID_FIELD)?;
    let receipt = state.membership.accept_application(&actor, &target).await?;
    Ok(web::Json(TransitionResponse::from(receipt)))
}

/// Reject a pending application; the applicant keeps applicant standing.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{id}/reject",
    params(
        ("id" = String, Path, description = "Applicant account identifier")
    ),
    responses(
        (status = 200, description = "Application rejected", body = TransitionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Officer role required or target not pending", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["membership"],
    operation_id = "rejectApplication"
)]
#[post("/applications/{id}/reject")]
pub async fn reject_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TargetPath>,
) -> ApiResult<web::Json<TransitionResponse>> {
    let actor = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, TARGET_ID_FIELD)?;
    let receipt = state.membership.reject_application(&actor, &target).await?;
    Ok(web::Json(TransitionResponse::from(receipt)))
}

/// Promote a member to officer.
#[utoipa::path(
    post,
    path = "/api/v1/members/{id}/promote",
    params(
        ("id" = String, Path, description = "Member account identifier")
    ),
    responses(
        (status = 200, description = "Member promoted", body = TransitionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owner role required or target not a member", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["membership"],
    operation_id = "promoteMember"
)]
#[post("/members/{id}/promote")]
pub async fn promote_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TargetPath>,
) -> ApiResult<web::Json<TransitionResponse>> {
    let actor = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, TARGET_ID_FIELD)?;
    let receipt = state.membership.promote_member(&actor, &target).await?;
    Ok(web::Json(TransitionResponse::from(receipt)))
}

/// Demote an officer back to member.
#[utoipa::path(
    post,
    path = "/api/v1/officers/{id}/demote",
    params(
        ("id" = String, Path, description = "Officer account identifier")
    ),
    responses(
        (status = 200, description = "Officer demoted", body = TransitionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owner role required or target not an officer", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["membership"],
    operation_id = "demoteOfficer"
)]
#[post("/officers/{id}/demote")]
pub async fn demote_officer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TargetPath>,
) -> ApiResult<web::Json<TransitionResponse>> {
    let actor = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, TARGET_ID_FIELD)?;
    let receipt = state.membership.demote_officer(&actor, &target).await?;
    Ok(web::Json(TransitionResponse::from(receipt)))
}

/// Hand the club to an officer; the outgoing owner steps down to officer.
#[utoipa::path(
    post,
    path = "/api/v1/officers/{id}/transfer-ownership",
    params(
        ("id" = String, Path, description = "Officer account identifier")
    ),
    responses(
        (status = 200, description = "Ownership transferred", body = TransitionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owner role required or target not an officer", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["membership"],
    operation_id = "transferOwnership"
)]
#[post("/officers/{id}/transfer-ownership")]
pub async fn transfer_ownership(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TargetPath>,
) -> ApiResult<web::Json<TransitionResponse>> {
    let actor = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, TARGET_ID_FIELD)?;
    let receipt = state.membership.transfer_ownership(&actor, &target).await?;
    Ok(web::Json(TransitionResponse::from(receipt)))
}
