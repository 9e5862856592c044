//! Registration and session HTTP handlers.
//!
//! ```text
//! POST /api/v1/sign-up
//! POST /api/v1/login
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AccountIdentity, AccountProfile, Bio, EmailAddress, Error, LoginCredentials,
    LoginValidationError, Password, PersonName, PersonalStatement, Registration, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::{
    BIO_FIELD, EMAIL_FIELD, FIRST_NAME_FIELD, LAST_NAME_FIELD, PERSONAL_STATEMENT_FIELD,
    ProfileResponse, parse_experience_level,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, account_field_error, mismatch_error, missing_field_error, password_field_error,
};

const USERNAME_FIELD: FieldName = FieldName::new("username");
const PASSWORD_FIELD: FieldName = FieldName::new("password");
const PASSWORD_CONFIRMATION_FIELD: FieldName = FieldName::new("passwordConfirmation");

/// Request payload for `POST /api/v1/sign-up`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub experience_level: Option<String>,
    pub personal_statement: Option<String>,
    pub bio: Option<String>,
}

fn parse_sign_up_request(payload: SignUpRequest) -> Result<Registration, Error> {
    let username = payload
        .username
        .ok_or_else(|| missing_field_error(USERNAME_FIELD))?;
    let first_name = payload
        .first_name
        .ok_or_else(|| missing_field_error(FIRST_NAME_FIELD))?;
    let last_name = payload
        .last_name
        .ok_or_else(|| missing_field_error(LAST_NAME_FIELD))?;
    let email = payload
        .email
        .ok_or_else(|| missing_field_error(EMAIL_FIELD))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error(PASSWORD_FIELD))?;
    let confirmation = payload
        .password_confirmation
        .ok_or_else(|| missing_field_error(PASSWORD_CONFIRMATION_FIELD))?;

    if confirmation != password {
        return Err(mismatch_error(
            PASSWORD_CONFIRMATION_FIELD,
            "password confirmation must match the password",
        ));
    }

    let identity = AccountIdentity {
        username: Username::new(username)
            .map_err(|error| account_field_error(USERNAME_FIELD, &error))?,
        first_name: PersonName::new(first_name)
            .map_err(|error| account_field_error(FIRST_NAME_FIELD, &error))?,
        last_name: PersonName::new(last_name)
            .map_err(|error| account_field_error(LAST_NAME_FIELD, &error))?,
        email: EmailAddress::new(email)
            .map_err(|error| account_field_error(EMAIL_FIELD, &error))?,
    };
    let profile = AccountProfile {
        experience_level: parse_experience_level(payload.experience_level)?,
        personal_statement: PersonalStatement::new(payload.personal_statement.unwrap_or_default())
            .map_err(|error| account_field_error(PERSONAL_STATEMENT_FIELD, &error))?,
        bio: Bio::new(payload.bio.unwrap_or_default())
            .map_err(|error| account_field_error(BIO_FIELD, &error))?,
    };
    let password =
        Password::new(&password).map_err(|error| password_field_error(PASSWORD_FIELD, &error))?;

    Ok(Registration {
        identity,
        profile,
        password,
    })
}

/// Register a new account and log it in.
///
/// The account starts as a pending applicant; an officer decides the
/// application later.
#[utoipa::path(
    post,
    path = "/api/v1/sign-up",
    request_body = SignUpRequest,
    responses(
        (
            status = 201,
            description = "Account created and logged in",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = ProfileResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_sign_up_request(payload.into_inner())?;
    let account = state.registration.register(registration).await?;
    session.persist_account(account.id())?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(account)))
}

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"Password123"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate an account and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let account_id = state.login.authenticate(&credentials).await?;
    session.persist_account(&account_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the authenticated session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
