//! Roster listing behaviour over the HTTP API.
//!
//! Pages are 1-based with a fixed size, clamped into range, and each roster
//! opens only to the audience configured for it.

// Shared harness carries helpers used by the other integration suites.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use backend::domain::{ROSTER_PAGE_SIZE, Role};
use backend::test_support::http::{SEED_PASSWORD, seed_account};
use rstest::rstest;
use serde_json::Value;
use support::{get_json, login_as, spawn_app};

fn item_usernames(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["username"].as_str().expect("username").to_owned())
        .collect()
}

#[actix_web::test]
async fn member_roster_pages_walk_forwards_and_back() {
    let (app, repository) = spawn_app().await;
    for index in 1..=31 {
        seed_account(&repository, &format!("member{index:02}"), Role::Member).await;
    }
    let viewer = login_as(&app, "member01", SEED_PASSWORD).await;

    // No page parameter means the first page.
    let (status, page) = get_json(&app, "/api/v1/roster/members", &viewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["pageSize"], ROSTER_PAGE_SIZE);
    assert_eq!(page["totalItems"], 31);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["hasPrevious"], false);
    assert_eq!(page["hasNext"], true);
    assert_eq!(page["links"]["next"], "/api/v1/roster/members?page=2");
    assert!(page["links"]["previous"].is_null());
    let names = item_usernames(&page);
    assert_eq!(names.len(), ROSTER_PAGE_SIZE);
    assert_eq!(names.first().map(String::as_str), Some("member01"));
    assert_eq!(names.last().map(String::as_str), Some("member15"));

    let (status, page) = get_json(&app, "/api/v1/roster/members?page=2", &viewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 2);
    assert_eq!(page["hasPrevious"], true);
    assert_eq!(page["hasNext"], true);
    assert_eq!(page["links"]["previous"], "/api/v1/roster/members?page=1");
    assert_eq!(page["links"]["next"], "/api/v1/roster/members?page=3");
    let names = item_usernames(&page);
    assert_eq!(names.first().map(String::as_str), Some("member16"));
    assert_eq!(names.last().map(String::as_str), Some("member30"));

    let (status, page) = get_json(&app, "/api/v1/roster/members?page=3", &viewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 3);
    assert_eq!(page["hasNext"], false);
    assert_eq!(page["links"]["previous"], "/api/v1/roster/members?page=2");
    assert!(page["links"]["next"].is_null());
    assert_eq!(item_usernames(&page), vec!["member31"]);
}

#[rstest]
#[case::past_the_end("/api/v1/roster/members?page=99", 2)]
#[case::page_zero("/api/v1/roster/members?page=0", 1)]
#[actix_web::test]
async fn out_of_range_pages_clamp_to_the_ends(#[case] uri: &str, #[case] expected_page: usize) {
    let (app, repository) = spawn_app().await;
    for index in 1..=16 {
        seed_account(&repository, &format!("member{index:02}"), Role::Member).await;
    }
    let viewer = login_as(&app, "member01", SEED_PASSWORD).await;

    let (status, page) = get_json(&app, uri, &viewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], expected_page);
    assert_eq!(page["totalPages"], 2);
}

#[rstest]
#[case::alphabetic("abc")]
#[case::negative("-1")]
#[actix_web::test]
async fn page_numbers_must_be_positive_integers(#[case] raw: &str) {
    let (app, repository) = spawn_app().await;
    seed_account(&repository, "maxKerman", Role::Member).await;
    let viewer = login_as(&app, "maxKerman", SEED_PASSWORD).await;

    let (status, refusal) =
        get_json(&app, &format!("/api/v1/roster/members?page={raw}"), &viewer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(refusal["code"], "invalid_request");
    assert_eq!(refusal["details"]["field"], "page");
    assert_eq!(refusal["details"]["code"], "invalid_page");
    assert_eq!(refusal["details"]["value"], raw);
}

#[actix_web::test]
async fn each_roster_opens_to_its_configured_audience() {
    let (app, repository) = spawn_app().await;
    seed_account(&repository, "bilKerman", Role::Owner).await;
    seed_account(&repository, "valKerman", Role::Officer).await;
    seed_account(&repository, "maxKerman", Role::Member).await;
    seed_account(&repository, "pipKerman", Role::Applicant).await;

    // Officers review the applicant queue but not the officer bench.
    let officer = login_as(&app, "valKerman", SEED_PASSWORD).await;
    let (status, page) = get_json(&app, "/api/v1/roster/applicants", &officer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalItems"], 1);
    assert_eq!(item_usernames(&page), vec!["pipKerman"]);
    let (status, refusal) = get_json(&app, "/api/v1/roster/officers", &officer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(refusal["details"]["collection"], "officers");

    // The owner oversees officers; applicant review stays with officers.
    let owner = login_as(&app, "bilKerman", SEED_PASSWORD).await;
    let (status, page) = get_json(&app, "/api/v1/roster/officers", &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_usernames(&page), vec!["valKerman"]);
    let (status, refusal) = get_json(&app, "/api/v1/roster/applicants", &owner).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(refusal["details"]["viewerRole"], "owner");

    // Members browse the membership and nothing else.
    let member = login_as(&app, "maxKerman", SEED_PASSWORD).await;
    let (status, page) = get_json(&app, "/api/v1/roster/members", &member).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_usernames(&page), vec!["maxKerman"]);
    let (status, _) = get_json(&app, "/api/v1/roster/applicants", &member).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get_json(&app, "/api/v1/roster/officers", &member).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Applicants wait outside.
    let applicant = login_as(&app, "pipKerman", SEED_PASSWORD).await;
    let (status, refusal) = get_json(&app, "/api/v1/roster/members", &applicant).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(refusal["code"], "forbidden");
}
