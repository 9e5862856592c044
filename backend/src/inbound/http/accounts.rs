//! Account profile HTTP handlers.
//!
//! ```text
//! GET /api/v1/accounts/me
//! PUT /api/v1/accounts/me
//! PUT /api/v1/accounts/me/password
//! GET /api/v1/accounts/{id}
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::account::{GRAVATAR_SIZE_MINI, GRAVATAR_SIZE_PROFILE};
use crate::domain::ports::AccountView;
use crate::domain::{
    Account, Bio, EmailAddress, Error, ExperienceLevel, PasswordChange,
    PasswordChangeValidationError, PersonName, PersonalStatement, ProfileUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, account_field_error, invalid_experience_level_error, mismatch_error,
    missing_field_error, parse_account_id, password_field_error,
};

pub(crate) const FIRST_NAME_FIELD: FieldName = FieldName::new("firstName");
pub(crate) const LAST_NAME_FIELD: FieldName = FieldName::new("lastName");
pub(crate) const EMAIL_FIELD: FieldName = FieldName::new("email");
pub(crate) const EXPERIENCE_LEVEL_FIELD: FieldName = FieldName::new("experienceLevel");
pub(crate) const PERSONAL_STATEMENT_FIELD: FieldName = FieldName::new("personalStatement");
pub(crate) const BIO_FIELD: FieldName = FieldName::new("bio");
const ACCOUNT_ID_FIELD: FieldName = FieldName::new("id");
const CURRENT_PASSWORD_FIELD: FieldName = FieldName::new("currentPassword");
const NEW_PASSWORD_FIELD: FieldName = FieldName::new("newPassword");
const NEW_PASSWORD_CONFIRMATION_FIELD: FieldName = FieldName::new("newPasswordConfirmation");

/// The authenticated account's own profile.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub experience_level: String,
    pub personal_statement: String,
    pub bio: String,
    pub role: String,
    pub application_status: String,
    pub gravatar_url: String,
    pub gravatar_mini_url: String,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            full_name: account.full_name(),
            email: account.email().to_string(),
            experience_level: account.experience_level().to_string(),
            personal_statement: account.personal_statement().as_ref().to_owned(),
            bio: account.bio().as_ref().to_owned(),
            role: account.role().to_string(),
            application_status: account.application_status().to_string(),
            gravatar_url: account.gravatar_url(GRAVATAR_SIZE_PROFILE),
            gravatar_mini_url: account.gravatar_url(GRAVATAR_SIZE_MINI),
        }
    }
}

/// The fields every viewer may see about an account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub gravatar_mini_url: String,
}

impl From<&Account> for AccountSummaryResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            full_name: account.full_name(),
            role: account.role().to_string(),
            gravatar_mini_url: account.gravatar_url(GRAVATAR_SIZE_MINI),
        }
    }
}

/// Another account as seen through the visibility policy. Extended fields
/// are present only when the viewer holds full detail access.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountViewResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub gravatar_url: String,
    pub full_detail: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<String>,
}

impl From<AccountView> for AccountViewResponse {
    fn from(view: AccountView) -> Self {
        let AccountView {
            account,
            full_detail,
        } = view;
        let extended = full_detail.then(|| {
            (
                account.email().to_string(),
                account.experience_level().to_string(),
                account.personal_statement().as_ref().to_owned(),
                account.bio().as_ref().to_owned(),
                account.application_status().to_string(),
            )
        });
        let (email, experience_level, personal_statement, bio, application_status) = match extended
        {
            Some((email, level, statement, bio, status)) => {
                (Some(email), Some(level), Some(statement), Some(bio), Some(status))
            }
            None => (None, None, None, None, None),
        };
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            full_name: account.full_name(),
            role: account.role().to_string(),
            gravatar_url: account.gravatar_url(GRAVATAR_SIZE_PROFILE),
            full_detail,
            email,
            experience_level,
            personal_statement,
            bio,
            application_status,
        }
    }
}

/// Request payload for editing the authenticated account's profile.
///
/// The username is absent on purpose: handles are immutable once chosen.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub experience_level: Option<String>,
    pub personal_statement: Option<String>,
    pub bio: Option<String>,
}

/// Request payload for replacing the authenticated account's password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

pub(crate) fn parse_experience_level(value: Option<String>) -> Result<ExperienceLevel, Error> {
    match value {
        Some(raw) => ExperienceLevel::from_str(&raw)
            .map_err(|_| invalid_experience_level_error(EXPERIENCE_LEVEL_FIELD, &raw)),
        None => Ok(ExperienceLevel::default()),
    }
}

fn parse_update_profile_request(payload: UpdateProfileRequest) -> Result<ProfileUpdate, Error> {
    let first_name = payload
        .first_name
        .ok_or_else(|| missing_field_error(FIRST_NAME_FIELD))?;
    let last_name = payload
        .last_name
        .ok_or_else(|| missing_field_error(LAST_NAME_FIELD))?;
    let email = payload
        .email
        .ok_or_else(|| missing_field_error(EMAIL_FIELD))?;

    Ok(ProfileUpdate {
        first_name: PersonName::new(first_name)
            .map_err(|error| account_field_error(FIRST_NAME_FIELD, &error))?,
        last_name: PersonName::new(last_name)
            .map_err(|error| account_field_error(LAST_NAME_FIELD, &error))?,
        email: EmailAddress::new(email)
            .map_err(|error| account_field_error(EMAIL_FIELD, &error))?,
        experience_level: parse_experience_level(payload.experience_level)?,
        personal_statement: PersonalStatement::new(payload.personal_statement.unwrap_or_default())
            .map_err(|error| account_field_error(PERSONAL_STATEMENT_FIELD, &error))?,
        bio: Bio::new(payload.bio.unwrap_or_default())
            .map_err(|error| account_field_error(BIO_FIELD, &error))?,
    })
}

fn map_password_change_error(err: PasswordChangeValidationError) -> Error {
    match err {
        PasswordChangeValidationError::EmptyCurrentPassword => {
            Error::invalid_request("current password must not be empty").with_details(
                json!({ "field": "currentPassword", "code": "empty_current_password" }),
            )
        }
        PasswordChangeValidationError::NewPassword(inner) => {
            password_field_error(NEW_PASSWORD_FIELD, &inner)
        }
        PasswordChangeValidationError::ConfirmationMismatch => mismatch_error(
            NEW_PASSWORD_CONFIRMATION_FIELD,
            "password confirmation must match the new password",
        ),
    }
}

fn parse_change_password_request(payload: ChangePasswordRequest) -> Result<PasswordChange, Error> {
    let current = payload
        .current_password
        .ok_or_else(|| missing_field_error(CURRENT_PASSWORD_FIELD))?;
    let new = payload
        .new_password
        .ok_or_else(|| missing_field_error(NEW_PASSWORD_FIELD))?;
    let confirmation = payload
        .new_password_confirmation
        .ok_or_else(|| missing_field_error(NEW_PASSWORD_CONFIRMATION_FIELD))?;

    PasswordChange::try_from_parts(&current, &new, &confirmation)
        .map_err(map_password_change_error)
}

/// Path parameters for account lookups.
#[derive(Debug, Deserialize)]
pub struct AccountPath {
    id: String,
}

/// Fetch the authenticated account's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me",
    responses(
        (status = 200, description = "The authenticated account", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "getOwnProfile"
)]
#[get("/accounts/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = session.require_account_id()?;
    let account = state.profiles.fetch_profile(&account_id).await?;
    Ok(web::Json(ProfileResponse::from(account)))
}

/// Edit the authenticated account's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "The updated account", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateOwnProfile"
)]
#[put("/accounts/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = session.require_account_id()?;
    let update = parse_update_profile_request(payload.into_inner())?;
    let account = state
        .profile_commands
        .update_profile(&account_id, update)
        .await?;
    Ok(web::Json(ProfileResponse::from(account)))
}

/// Replace the authenticated account's password.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "changeOwnPassword"
)]
#[put("/accounts/me/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let account_id = session.require_account_id()?;
    let change = parse_change_password_request(payload.into_inner())?;
    state
        .profile_commands
        .change_password(&account_id, change)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch another account through the visibility policy.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = String, Path, description = "Account identifier")
    ),
    responses(
        (status = 200, description = "The account as the viewer may see it", body = AccountViewResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "viewAccount"
)]
#[get("/accounts/{id}")]
pub async fn view_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AccountPath>,
) -> ApiResult<web::Json<AccountViewResponse>> {
    let viewer = session.require_account_id()?;
    let target = parse_account_id(path.into_inner().id, ACCOUNT_ID_FIELD)?;
    let view = state.profiles.view_account(&viewer, &target).await?;
    Ok(web::Json(AccountViewResponse::from(view)))
}
