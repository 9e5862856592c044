//! Shared harness for the HTTP integration suites.
//!
//! Assembles the `/api/v1` router the way the production server does,
//! backed by the in-memory repository, so each suite can drive complete
//! account journeys over HTTP without a database.

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error, test as actix_test, web};
use backend::Trace;
use backend::domain::ports::InMemoryAccountRepository;
use backend::inbound::http::accounts::{
    change_password, current_account, update_profile, view_account,
};
use backend::inbound::http::auth::{LoginRequest, SignUpRequest, login, logout, sign_up};
use backend::inbound::http::membership::{
    accept_application, demote_officer, promote_member, reject_application, transfer_ownership,
};
use backend::inbound::http::roster::{list_applicants, list_members, list_officers};
use backend::test_support::http::{SEED_PASSWORD, memory_state_with_repository, session_middleware};
use serde::Serialize;
use serde_json::Value;

/// Spin up the full API router over a fresh in-memory repository.
pub async fn spawn_app() -> (
    impl Service<Request, Response = ServiceResponse, Error = Error>,
    Arc<InMemoryAccountRepository>,
) {
    let (state, repository) = memory_state_with_repository();
    // `/accounts/me` routes precede `/accounts/{id}` so the literal segment
    // wins the match.
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session_middleware())
                    .service(sign_up)
                    .service(login)
                    .service(logout)
                    .service(current_account)
                    .service(update_profile)
                    .service(change_password)
                    .service(view_account)
                    .service(accept_application)
                    .service(reject_application)
                    .service(promote_member)
                    .service(demote_officer)
                    .service(transfer_ownership)
                    .service(list_applicants)
                    .service(list_members)
                    .service(list_officers),
            ),
    )
    .await;
    (app, repository)
}

fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn call_and_parse(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    request: Request,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON response body")
    };
    (status, value)
}

/// Register `username` over HTTP. Returns the new account's id and the
/// session cookie the sign-up established.
pub async fn sign_up_account(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    username: &str,
) -> (String, Cookie<'static>) {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/sign-up")
        .set_json(SignUpRequest {
            username: Some(username.to_owned()),
            first_name: Some("Casper".to_owned()),
            last_name: Some("Mattress".to_owned()),
            email: Some(format!("{username}@example.org")),
            password: Some(SEED_PASSWORD.to_owned()),
            password_confirmation: Some(SEED_PASSWORD.to_owned()),
            experience_level: None,
            personal_statement: None,
            bio: None,
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body: Value = actix_test::read_body_json(response).await;
    let id = body["id"].as_str().expect("account id").to_owned();
    (id, cookie)
}

/// Log in and return the session cookie.
pub async fn login_as(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    username: &str,
    password: &str,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

/// Issue a GET with the session cookie. Returns the status and parsed body
/// (`Value::Null` when the body is empty).
pub async fn get_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    uri: &str,
    cookie: &Cookie<'static>,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    call_and_parse(app, request).await
}

/// Issue a PUT carrying `payload` with the session cookie.
pub async fn put_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    uri: &str,
    cookie: &Cookie<'static>,
    payload: &impl Serialize,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::put()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(payload)
        .to_request();
    call_and_parse(app, request).await
}

/// POST to a transition endpoint with the session cookie.
pub async fn post_transition(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    uri: &str,
    cookie: &Cookie<'static>,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    call_and_parse(app, request).await
}
