//! Profile self-service and account viewing over the HTTP API.

// Shared harness carries helpers used by the other integration suites.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use backend::domain::Role;
use backend::inbound::http::accounts::{ChangePasswordRequest, UpdateProfileRequest};
use backend::inbound::http::auth::LoginRequest;
use backend::test_support::http::{SEED_PASSWORD, seed_account};
use support::{get_json, login_as, put_json, sign_up_account, spawn_app};

#[actix_web::test]
async fn a_fresh_sign_up_reads_and_reshapes_its_profile() {
    let (app, _repository) = spawn_app().await;
    let (id, session) = sign_up_account(&app, "casper").await;

    let (status, profile) = get_json(&app, "/api/v1/accounts/me", &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], id);
    assert_eq!(profile["username"], "casper");
    assert_eq!(profile["fullName"], "Casper Mattress");
    assert_eq!(profile["role"], "applicant");
    assert_eq!(profile["applicationStatus"], "pending");
    assert_eq!(profile["experienceLevel"], "beginner");
    let gravatar = profile["gravatarUrl"].as_str().expect("gravatar url");
    assert!(gravatar.starts_with("https://www.gravatar.com/avatar/"));

    let update = UpdateProfileRequest {
        first_name: Some("Cassandra".to_owned()),
        last_name: Some("Mattress".to_owned()),
        email: Some("cassandra@example.org".to_owned()),
        experience_level: Some("advanced".to_owned()),
        personal_statement: Some("Ready for launch duty.".to_owned()),
        bio: Some("Grows rockets from seed.".to_owned()),
    };
    let (status, updated) = put_json(&app, "/api/v1/accounts/me", &session, &update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Cassandra");
    assert_eq!(updated["fullName"], "Cassandra Mattress");
    assert_eq!(updated["email"], "cassandra@example.org");
    assert_eq!(updated["experienceLevel"], "advanced");
    assert_eq!(updated["personalStatement"], "Ready for launch duty.");
    assert_eq!(updated["bio"], "Grows rockets from seed.");
    // The username is fixed at sign-up.
    assert_eq!(updated["username"], "casper");
    // The avatar follows the email address.
    assert_ne!(updated["gravatarUrl"], profile["gravatarUrl"]);

    let (status, reread) = get_json(&app, "/api/v1/accounts/me", &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reread["firstName"], "Cassandra");
    assert_eq!(reread["email"], "cassandra@example.org");
}

#[actix_web::test]
async fn profile_updates_keep_required_fields() {
    let (app, _repository) = spawn_app().await;
    let (_, session) = sign_up_account(&app, "casper").await;

    let update = UpdateProfileRequest {
        first_name: Some("Cassandra".to_owned()),
        last_name: None,
        email: Some("cassandra@example.org".to_owned()),
        experience_level: None,
        personal_statement: None,
        bio: None,
    };
    let (status, refusal) = put_json(&app, "/api/v1/accounts/me", &session, &update).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(refusal["code"], "invalid_request");
    assert_eq!(refusal["details"]["field"], "lastName");
    assert_eq!(refusal["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn changing_the_password_rotates_the_login_credential() {
    let (app, _repository) = spawn_app().await;
    let (_, session) = sign_up_account(&app, "casper").await;

    let change = ChangePasswordRequest {
        current_password: Some(SEED_PASSWORD.to_owned()),
        new_password: Some("Stronger456".to_owned()),
        new_password_confirmation: Some("Stronger456".to_owned()),
    };
    let (status, _) = put_json(&app, "/api/v1/accounts/me/password", &session, &change).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The old credential is dead.
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            username: "casper".to_owned(),
            password: SEED_PASSWORD.to_owned(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The new one signs in.
    login_as(&app, "casper", "Stronger456").await;
}

#[actix_web::test]
async fn password_changes_demand_the_current_credential() {
    let (app, _repository) = spawn_app().await;
    let (_, session) = sign_up_account(&app, "casper").await;

    let change = ChangePasswordRequest {
        current_password: Some("NotThePassword1".to_owned()),
        new_password: Some("Stronger456".to_owned()),
        new_password_confirmation: Some("Stronger456".to_owned()),
    };
    let (status, refusal) = put_json(&app, "/api/v1/accounts/me/password", &session, &change).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(refusal["details"]["field"], "currentPassword");
    assert_eq!(refusal["details"]["code"], "incorrect");

    // The original credential still works.
    login_as(&app, "casper", SEED_PASSWORD).await;
}

#[actix_web::test]
async fn extended_detail_shows_only_to_reviewers() {
    let (app, repository) = spawn_app().await;
    let officer_id = seed_account(&repository, "valKerman", Role::Officer).await;
    let member_id = seed_account(&repository, "maxKerman", Role::Member).await;
    let (newcomer_id, newcomer_session) = sign_up_account(&app, "casper").await;

    // Officers review applicants in full.
    let officer = login_as(&app, "valKerman", SEED_PASSWORD).await;
    let (status, view) = get_json(&app, &format!("/api/v1/accounts/{newcomer_id}"), &officer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fullDetail"], true);
    assert_eq!(view["email"], "casper@example.org");
    assert_eq!(view["applicationStatus"], "pending");

    // Members see the public summary of their officials.
    let member = login_as(&app, "maxKerman", SEED_PASSWORD).await;
    let (status, view) = get_json(&app, &format!("/api/v1/accounts/{officer_id}"), &member).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fullDetail"], false);
    assert_eq!(view["username"], "valKerman");
    assert!(view["email"].is_null());
    assert!(view["applicationStatus"].is_null());

    // Applicants see summaries too.
    let (status, view) = get_json(
        &app,
        &format!("/api/v1/accounts/{member_id}"),
        &newcomer_session,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fullDetail"], false);
    assert!(view["email"].is_null());

    // Looking yourself up goes through the same summary path.
    let (status, view) = get_json(&app, &format!("/api/v1/accounts/{officer_id}"), &officer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fullDetail"], false);
}

#[actix_web::test]
async fn account_lookups_validate_the_identifier() {
    let (app, repository) = spawn_app().await;
    seed_account(&repository, "valKerman", Role::Officer).await;
    let officer = login_as(&app, "valKerman", SEED_PASSWORD).await;

    let (status, refusal) = get_json(
        &app,
        "/api/v1/accounts/3fa85f64-5717-4562-b3fc-2c963f66afa6",
        &officer,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(refusal["code"], "not_found");

    let (status, refusal) = get_json(&app, "/api/v1/accounts/not-a-uuid", &officer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(refusal["details"]["field"], "id");
    assert_eq!(refusal["details"]["code"], "invalid_uuid");
}
