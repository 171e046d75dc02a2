//! HTTP-level tests for projects, budget figures and the report endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_project, create_user, delete_auth, get_auth, post_json_auth, put_json_auth,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;

fn launch() -> serde_json::Value {
    json!({
        "name": "Launch",
        "start_date": "2025-01-01",
        "due_date": "2025-06-01",
        "status": "planning",
        "budget": 10000
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_launch_budget_scenario(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let token = token_for(alice.id);
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, launch()).await;
    assert_eq!(project["owner_id"], alice.id);
    let id = project["id"].as_i64().unwrap();

    let members = body_json(get_auth(&app, &format!("/api/v1/projects/{id}/members"), &token).await).await;
    let member_ids: Vec<i64> = members["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["user_id"].as_i64().unwrap())
        .collect();
    assert_eq!(member_ids, vec![alice.id]);

    let uri = format!("/api/v1/projects/{id}/expenditures");
    let response = post_json_auth(&app, &uri, &token, json!({"amount": 2500, "description": "ads"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let detail = body_json(get_auth(&app, &format!("/api/v1/projects/{id}"), &token).await).await;
    assert_eq!(detail["project"]["name"], "Launch");
    assert_eq!(detail["actual_cost"], 2500.0);
    assert_eq!(detail["remaining_budget"], 7500.0);
    assert_eq!(detail["isOverBudget"], false);

    let response =
        post_json_auth(&app, &uri, &token, json!({"amount": 8000, "description": "venue"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let detail = body_json(get_auth(&app, &format!("/api/v1/projects/{id}"), &token).await).await;
    assert_eq!(detail["actual_cost"], 10500.0);
    assert_eq!(detail["remaining_budget"], -500.0);
    assert_eq!(detail["display_remaining"], 0.0);
    assert_eq!(detail["isOverBudget"], true);
    assert_eq!(detail["utilization_percent"], 105);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_outsider_cannot_read_project(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let app = common::build_test_app(pool);
    let project = create_project(&app, &token_for(alice.id), launch()).await;
    let id = project["id"].as_i64().unwrap();

    let response = get_auth(&app, &format!("/api/v1/projects/{id}"), &token_for(bob.id)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "You do not have access to this project.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_project_returns_404(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/projects/999999", &token_for(alice.id)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_due_date_before_start_is_rejected(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        &app,
        "/api/v1/projects",
        &token_for(alice.id),
        json!({"name": "Backwards", "start_date": "2025-06-01", "due_date": "2025-01-01"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["due_date"].is_array());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_required_field_is_a_field_error(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        &app,
        "/api/v1/projects",
        &token_for(alice.id),
        json!({"name": "Launch"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["start_date"][0], "The start_date field is required.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_mistyped_field_is_a_field_error(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        &app,
        "/api/v1/projects",
        &token_for(alice.id),
        json!({"name": "Launch", "start_date": "2025-01-01", "budget": "lots"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["budget"].is_array());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_malformed_limit_is_a_validation_error(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/projects?limit=many", &token_for(alice.id)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_only_owner_updates_and_deletes(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let app = common::build_test_app(pool);
    let owner = token_for(alice.id);
    let member = token_for(bob.id);
    let project = create_project(&app, &owner, launch()).await;
    let id = project["id"].as_i64().unwrap();
    post_json_auth(
        &app,
        &format!("/api/v1/projects/{id}/members"),
        &owner,
        json!({"user_id": bob.id}),
    )
    .await;

    let uri = format!("/api/v1/projects/{id}");
    let response = put_json_auth(&app, &uri, &member, json!({"name": "Hijacked"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(&app, &uri, &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(&app, &uri, &owner, json!({"status": "active", "budget": null})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "active");
    assert!(json["budget"].is_null());
    assert_eq!(json["name"], "Launch");

    let response = delete_auth(&app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(&app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_shows_owned_and_joined_projects(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let app = common::build_test_app(pool);
    let owner = token_for(alice.id);

    let joined = create_project(&app, &owner, launch()).await;
    create_project(&app, &owner, json!({"name": "Private", "start_date": "2025-02-01"})).await;
    post_json_auth(
        &app,
        &format!("/api/v1/projects/{}/members", joined["id"]),
        &owner,
        json!({"user_id": bob.id}),
    )
    .await;

    let json = body_json(get_auth(&app, "/api/v1/projects", &token_for(bob.id)).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Launch"]);

    let json = body_json(get_auth(&app, "/api/v1/projects?limit=1", &owner).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_report_counts_tasks_by_status(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let app = common::build_test_app(pool);
    let token = token_for(alice.id);
    let project = create_project(&app, &token, launch()).await;
    let id = project["id"].as_i64().unwrap();

    let tasks_uri = format!("/api/v1/projects/{id}/tasks");
    for (title, status) in [("A", "todo"), ("B", "completed"), ("C", "completed"), ("D", "review")] {
        let response =
            post_json_auth(&app, &tasks_uri, &token, json!({"title": title, "status": status})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get_auth(&app, &format!("/api/v1/projects/{id}/report"), &token).await).await;
    assert_eq!(json["tasks"]["total"], 4);
    assert_eq!(json["tasks"]["completed"], 2);
    assert_eq!(json["tasks"]["review"], 1);
    assert_eq!(json["tasks"]["completion_percent"], 50);
    assert_eq!(json["budget"]["actual_cost"], 0.0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_expenditures_are_owner_only(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let app = common::build_test_app(pool);
    let owner = token_for(alice.id);
    let project = create_project(&app, &owner, launch()).await;
    let id = project["id"].as_i64().unwrap();
    post_json_auth(
        &app,
        &format!("/api/v1/projects/{id}/members"),
        &owner,
        json!({"user_id": bob.id}),
    )
    .await;

    let uri = format!("/api/v1/projects/{id}/expenditures");
    let response = post_json_auth(
        &app,
        &uri,
        &token_for(bob.id),
        json!({"amount": 10, "description": "coffee"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(&app, &uri, &owner, json!({"amount": -5, "description": "refund"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let created = body_json(
        post_json_auth(&app, &uri, &owner, json!({"amount": 40, "description": "hosting"})).await,
    )
    .await;
    let list = body_json(get_auth(&app, &uri, &token_for(bob.id)).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let item_uri = format!("/api/v1/expenditures/{}", created["id"]);
    let response = delete_auth(&app, &item_uri, &token_for(bob.id)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(&app, &item_uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
