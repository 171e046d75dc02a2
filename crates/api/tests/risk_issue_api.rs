//! HTTP-level tests for the risk/issue register.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    body_json, create_project, create_user, delete_auth, get_auth, post_json_auth, put_json_auth,
    token_for,
};
use pmtrack_db::models::activity_log::CreateActivityLog;
use pmtrack_events::{ActivityNotifier, ActivitySink, SinkError};
use serde_json::json;
use sqlx::PgPool;

/// Sink that refuses every row.
struct UnavailableSink;

#[async_trait]
impl ActivitySink for UnavailableSink {
    async fn write(&self, _entry: &CreateActivityLog) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("activity store offline".into()))
    }
}

async fn setup(pool: &PgPool) -> (axum::Router, String, String, i64) {
    let alice = create_user(pool, "Alice").await;
    let bob = create_user(pool, "Bob").await;
    let app = common::build_test_app(pool.clone());
    let owner = token_for(alice.id);
    let project = create_project(&app, &owner, json!({"name": "Launch", "start_date": "2025-01-01"})).await;
    let id = project["id"].as_i64().unwrap();
    post_json_auth(
        &app,
        &format!("/api/v1/projects/{id}/members"),
        &owner,
        json!({"user_id": bob.id}),
    )
    .await;
    (app, owner, token_for(bob.id), id)
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_member_reports_issue_but_not_risk(pool: PgPool) {
    let (app, _owner, member, project_id) = setup(&pool).await;
    let uri = format!("/api/v1/projects/{project_id}/risks-issues");

    let response = post_json_auth(&app, &uri, &member, json!({"type": "issue", "title": "Server down"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["type"], "issue");
    assert_eq!(json["status"], "open");
    assert_eq!(json["impact_level"], "medium");

    let response = post_json_auth(&app, &uri, &member, json!({"type": "risk", "title": "Vendor delay"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Only project owners can add risks.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_outsider_gets_forbidden_before_validation(pool: PgPool) {
    let (app, _owner, _member, project_id) = setup(&pool).await;
    let eve = create_user(&pool, "Eve").await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/projects/{project_id}/risks-issues"),
        &token_for(eve.id),
        json!({"type": "incident", "title": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Unauthorized access to project risks/issues."
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_type_is_a_field_error_for_members(pool: PgPool) {
    let (app, owner, _member, project_id) = setup(&pool).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/projects/{project_id}/risks-issues"),
        &owner,
        json!({"type": "incident", "title": "Outage"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["type"].is_array());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_update_notify_the_whole_project(pool: PgPool) {
    let (app, owner, member, project_id) = setup(&pool).await;

    let created = body_json(
        post_json_auth(
            &app,
            &format!("/api/v1/projects/{project_id}/risks-issues"),
            &owner,
            json!({"type": "risk", "title": "Budget cut", "impact_level": "high"}),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/risks-issues/{}", created["id"]);

    // Members may not edit risks.
    let response = put_json_auth(&app, &uri, &member, json!({"status": "mitigated"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Only project owners can update risks.");

    let response = put_json_auth(&app, &uri, &owner, json!({"status": "mitigated"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "mitigated");

    for token in [&owner, &member] {
        let feed = body_json(get_auth(&app, "/api/v1/notifications", token).await).await;
        let descriptions: Vec<&str> = feed["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|n| n["action"].as_str().unwrap().starts_with("risk_issue"))
            .map(|n| n["description"].as_str().unwrap())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "The risk 'Budget cut' has been updated in project 'Launch'",
                "A new risk was reported: 'Budget cut' in project 'Launch'",
            ]
        );
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_member_edits_issue_and_only_owner_deletes(pool: PgPool) {
    let (app, owner, member, project_id) = setup(&pool).await;
    let created = body_json(
        post_json_auth(
            &app,
            &format!("/api/v1/projects/{project_id}/risks-issues"),
            &member,
            json!({"type": "issue", "title": "Login broken", "description": "500 on submit"}),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/risks-issues/{}", created["id"]);

    let response = put_json_auth(&app, &uri, &member, json!({"status": "resolved", "description": null})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "resolved");
    assert!(json["description"].is_null());

    let response = delete_auth(&app, &uri, &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(&app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = body_json(
        get_auth(&app, &format!("/api/v1/projects/{project_id}/risks-issues"), &member).await,
    )
    .await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_ignores_requested_status(pool: PgPool) {
    let (app, owner, _member, project_id) = setup(&pool).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/projects/{project_id}/risks-issues"),
        &owner,
        json!({"type": "risk", "title": "Scope creep", "status": "closed"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["status"], "open");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_failed_notification_does_not_fail_the_mutation(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app_with_notifier(
        pool.clone(),
        ActivityNotifier::new(Arc::new(UnavailableSink)),
    );
    let owner = token_for(alice.id);
    let project = create_project(&app, &owner, json!({"name": "Launch", "start_date": "2025-01-01"})).await;
    let project_id = project["id"].as_i64().unwrap();

    let response = post_json_auth(
        &app,
        &format!("/api/v1/projects/{project_id}/risks-issues"),
        &owner,
        json!({"type": "issue", "title": "Server down"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let uri = format!("/api/v1/risks-issues/{}", body_json(response).await["id"]);

    let response = put_json_auth(&app, &uri, &owner, json!({"status": "resolved"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get_auth(&app, &uri, &owner).await).await;
    assert_eq!(fetched["status"], "resolved");
    let feed = body_json(get_auth(&app, "/api/v1/notifications", &owner).await).await;
    assert!(feed["data"].as_array().unwrap().is_empty());
}
