#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use gantt_schedule::http_api::{self, CheckResponse, ScheduleResponse};
use gantt_schedule::{EntryKind, Milestone, ProjectPlan, ScheduleMetadata, Task};
use serde_json::Value;
use tower::util::ServiceExt;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_plan() -> ProjectPlan {
    ProjectPlan::new(
        ScheduleMetadata::starting_on(d(2025, 5, 1)),
        vec![
            Task::new(1, "Design", 4),
            Task::new(2, "Build", 6).with_predecessors([1]),
        ],
        vec![Milestone::new(1, "Done", [2])],
    )
}

fn post_json(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = http_api::router()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn schedule_returns_summary_and_entries() {
    let body = serde_json::to_vec(&sample_plan()).unwrap();
    let response = http_api::router()
        .oneshot(post_json("/schedule", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload: ScheduleResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(payload.summary.task_count, 2);
    assert_eq!(payload.summary.milestone_count, 1);
    assert_eq!(payload.summary.project_finish, d(2025, 5, 11));
    assert_eq!(payload.entries.len(), 3);
    assert_eq!(payload.entries[2].kind, EntryKind::Milestone(1));
    assert_eq!(payload.entries[2].start, d(2025, 5, 11));
}

#[tokio::test]
async fn cyclic_plan_is_unprocessable() {
    let mut plan = sample_plan();
    plan.tasks[0].predecessors = vec![2];
    let body = serde_json::to_vec(&plan).unwrap();

    let response = http_api::router()
        .oneshot(post_json("/schedule", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(value["error"], "cycle");
    assert!(
        value["message"]
            .as_str()
            .unwrap()
            .starts_with("circular dependency detected")
    );
}

#[tokio::test]
async fn dangling_milestone_reference_is_unprocessable() {
    let mut plan = sample_plan();
    plan.milestones[0].required_tasks = vec![9];
    let body = serde_json::to_vec(&plan).unwrap();

    let response = http_api::router()
        .oneshot(post_json("/schedule", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(value["error"], "dangling_reference");
    assert_eq!(value["message"], "milestone 1 depends on non-existent task 9");
}

#[tokio::test]
async fn check_counts_records_without_dating() {
    let body = serde_json::to_vec(&sample_plan()).unwrap();
    let response = http_api::router()
        .oneshot(post_json("/check", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload: CheckResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(payload.status, "ok");
    assert_eq!(payload.task_count, 2);
    assert_eq!(payload.milestone_count, 1);
}

#[tokio::test]
async fn check_rejects_dangling_task_reference() {
    let mut plan = sample_plan();
    plan.tasks[1].predecessors = vec![1, 3];
    let body = serde_json::to_vec(&plan).unwrap();

    let response = http_api::router()
        .oneshot(post_json("/check", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(value["error"], "dangling_reference");
}

#[tokio::test]
async fn plan_without_start_date_is_rejected() {
    let body = br#"{ "tasks": [ { "id": 1, "name": "a", "duration_days": 3 } ] }"#.to_vec();
    let response = http_api::router()
        .oneshot(post_json("/schedule", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = br#"{
        "metadata": { "project_name": "Undated" },
        "tasks": [ { "id": 1, "name": "a", "duration_days": 3 } ]
    }"#
    .to_vec();
    let response = http_api::router()
        .oneshot(post_json("/check", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_task_id_is_unprocessable() {
    let mut plan = sample_plan();
    plan.tasks.push(Task::new(2, "Build again", 1));
    let body = serde_json::to_vec(&plan).unwrap();

    let response = http_api::router()
        .oneshot(post_json("/schedule", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(value["error"], "duplicate_task");
}
