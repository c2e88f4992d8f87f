// src/web/handlers.rs

//! Route handlers.

use axum::{
    Json,
    extract::State,
    response::Html,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{Project, ReportRow};
use crate::pipeline::ReportStats;
use crate::services::ReportQuery;
use crate::utils::text;

use super::AppState;
use super::error::{ApiError, ApiResult};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Body of `POST /process`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(deserialize_with = "id_text")]
    pub project_id: String,
    /// Epoch milliseconds anywhere inside the first day
    pub start_date: i64,
    /// Epoch milliseconds anywhere inside the last day
    pub end_date: i64,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub websites: Vec<ReportRow>,
    pub summary: ReportStats,
}

/// Accept project ids sent as either JSON numbers or strings.
fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(Some(&value)))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Always a JSON array; an upstream failure is logged and yields `[]`.
pub async fn projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let projects = state.backend.projects().await.unwrap_or_else(|e| {
        log::error!("Error fetching projects: {e}");
        Vec::new()
    });
    Json(projects)
}

pub async fn process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    if request.project_id.trim().is_empty() {
        return Err(ApiError::BadRequest("projectId is required".to_string()));
    }

    let window = state
        .zone
        .day_window(request.start_date, request.end_date)?;
    if window.start_ms > window.end_ms {
        return Err(ApiError::BadRequest(
            "endDate falls before startDate".to_string(),
        ));
    }

    log::info!(
        "Processing project {:?} ({}) from {} to {}",
        request.project_name.as_deref().unwrap_or(""),
        request.project_id,
        window.start_ms,
        window.end_ms
    );

    let query = ReportQuery {
        project_id: request.project_id,
        window,
    };
    let report = state.backend.report(&query).await?;

    Ok(Json(ProcessResponse {
        status: "success",
        websites: report.websites,
        summary: report.stats,
    }))
}
