use std::net::SocketAddr;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{ProjectPlan, ScheduleError, ScheduleSummary, ScheduledEntry};

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Unprocessable(ScheduleError),
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        ApiError::Unprocessable(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unprocessable(err) => {
                warn!(code = err.code(), %err, "rejected schedule request");
                let body = Json(ErrorBody {
                    error: err.code(),
                    message: err.to_string(),
                });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub summary: ScheduleSummary,
    pub entries: Vec<ScheduledEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: String,
    pub task_count: usize,
    pub milestone_count: usize,
}

/// Every request carries its own plan; the router holds no schedule state.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule", post(compute_schedule))
        .route("/check", post(check_plan))
}

pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let app = router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gantt-schedule HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn compute_schedule(
    Json(plan): Json<ProjectPlan>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule = plan.schedule()?;
    let summary = schedule.summary();
    Ok(Json(ScheduleResponse {
        summary,
        entries: schedule.into_entries(),
    }))
}

async fn check_plan(Json(plan): Json<ProjectPlan>) -> Result<Json<CheckResponse>, ApiError> {
    let graph = plan.check()?;
    Ok(Json(CheckResponse {
        status: "ok".to_string(),
        task_count: graph.len(),
        milestone_count: plan.milestones.len(),
    }))
}
