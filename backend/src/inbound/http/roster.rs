//! Roster listing HTTP handlers.
//!
//! ```text
//! GET /api/v1/roster/applicants?page=N
//! GET /api/v1/roster/members?page=N
//! GET /api/v1/roster/officers?page=N
//! ```

use actix_web::{get, web};
use pagination::{Page, PageLinks, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, Error, RosterCollection};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::AccountSummaryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_page_error};

const PAGE_FIELD: FieldName = FieldName::new("page");

/// Query parameters for roster pages.
#[derive(Debug, Deserialize)]
pub struct RosterPageQuery {
    page: Option<String>,
}

fn parse_page(query: RosterPageQuery) -> Result<PageRequest, Error> {
    match query.page {
        Some(raw) => raw
            .parse::<usize>()
            .map(PageRequest::new)
            .map_err(|_| invalid_page_error(PAGE_FIELD, &raw)),
        None => Ok(PageRequest::FIRST),
    }
}

/// Relative navigation links for a roster page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// One page of a roster plus navigation bookkeeping.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterPageResponse {
    pub items: Vec<AccountSummaryResponse>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub links: RosterLinks,
}

fn roster_response(page: Page<Account>, path: &str) -> RosterPageResponse {
    let page = page.map(|account| AccountSummaryResponse::from(&account));
    let links = PageLinks::for_page(&page, path);
    RosterPageResponse {
        page: page.number(),
        page_size: page.page_size(),
        total_items: page.total_items(),
        total_pages: page.total_pages(),
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        links: RosterLinks {
            next: links.next().map(ToOwned::to_owned),
            previous: links.previous().map(ToOwned::to_owned),
        },
        items: page.into_items(),
    }
}

/// List pending applicants. Officers only.
#[utoipa::path(
    get,
    path = "/api/v1/roster/applicants",
    params(
        ("page" = Option<String>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "A page of applicants", body = RosterPageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Officer role required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "listApplicants"
)]
#[get("/roster/applicants")]
pub async fn list_applicants(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RosterPageQuery>,
) -> ApiResult<web::Json<RosterPageResponse>> {
    let viewer = session.require_account_id()?;
    let page = parse_page(query.into_inner())?;
    let page = state
        .rosters
        .browse(&viewer, RosterCollection::Applicants, page)
        .await?;
    Ok(web::Json(roster_response(page, "/api/v1/roster/applicants")))
}

/// List members. Any member, officer, or the owner may browse.
#[utoipa::path(
    get,
    path = "/api/v1/roster/members",
    params(
        ("page" = Option<String>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "A page of members", body = RosterPageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Member standing required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "listMembers"
)]
#[get("/roster/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RosterPageQuery>,
) -> ApiResult<web::Json<RosterPageResponse>> {
    let viewer = session.require_account_id()?;
    let page = parse_page(query.into_inner())?;
    let page = state
        .rosters
        .browse(&viewer, RosterCollection::Members, page)
        .await?;
    Ok(web::Json(roster_response(page, "/api/v1/roster/members")))
}

/// List officers. Owner only.
#[utoipa::path(
    get,
    path = "/api/v1/roster/officers",
    params(
        ("page" = Option<String>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "A page of officers", body = RosterPageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owner role required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "listOfficers"
)]
#[get("/roster/officers")]
pub async fn list_officers(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RosterPageQuery>,
) -> ApiResult<web::Json<RosterPageResponse>> {
    let viewer = session.require_account_id()?;
    let page = parse_page(query.into_inner())?;
    let page = state
        .rosters
        .browse(&viewer, RosterCollection::Officers, page)
        .await?;
    Ok(web::Json(roster_response(page, "/api/v1/roster/officers")))
}
