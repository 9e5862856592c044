//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, accounts,
//!   membership, roster, health)
//! - **Schemas**: Request and response payloads plus the domain error
//!   wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{
    AccountSummaryResponse, AccountViewResponse, ChangePasswordRequest, ProfileResponse,
    UpdateProfileRequest,
};
use crate::inbound::http::auth::{LoginRequest, SignUpRequest};
use crate::inbound::http::membership::TransitionResponse;
use crate::inbound::http::roster::{RosterLinks, RosterPageResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or POST /api/v1/sign-up.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Club membership backend API",
        description = "HTTP interface for account registration, session \
            authentication, membership transitions, rosters, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::accounts::current_account,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::accounts::change_password,
        crate::inbound::http::accounts::view_account,
        crate::inbound::http::membership::accept_application,
        crate::inbound::http::membership::reject_application,
        crate::inbound::http::membership::promote_member,
        crate::inbound::http::membership::demote_officer,
        crate::inbound::http::membership::transfer_ownership,
        crate::inbound::http::roster::list_applicants,
        crate::inbound::http::roster::list_members,
        crate::inbound::http::roster::list_officers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignUpRequest,
        LoginRequest,
        ProfileResponse,
        AccountSummaryResponse,
        AccountViewResponse,
        UpdateProfileRequest,
        ChangePasswordRequest,
        TransitionResponse,
        RosterPageResponse,
        RosterLinks,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Registration and session lifecycle"),
        (name = "accounts", description = "Profile access and credential management"),
        (name = "membership", description = "Role and application transitions"),
        (name = "roster", description = "Paginated member listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure and path registration.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_profile_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let profile_schema = schemas.get("ProfileResponse").expect("profile schema");

        assert_object_schema_has_field(profile_schema, "id");
        assert_object_schema_has_field(profile_schema, "username");
        assert_object_schema_has_field(profile_schema, "gravatarUrl");
    }

    #[test]
    fn openapi_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/sign-up",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/accounts/me",
            "/api/v1/accounts/me/password",
            "/api/v1/accounts/{id}",
            "/api/v1/applications/{id}/accept",
            "/api/v1/applications/{id}/reject",
            "/api/v1/members/{id}/promote",
            "/api/v1/officers/{id}/demote",
            "/api/v1/officers/{id}/transfer-ownership",
            "/api/v1/roster/applicants",
            "/api/v1/roster/members",
            "/api/v1/roster/officers",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path '{path}' in OpenAPI document"
            );
        }
    }
}
