use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::backlog::{read_backlog, split_sections};
use crate::error::CostError;
use crate::usage::{clamp_history_days, utc_today, CostSources};

use super::dto::*;

/// Shared application state
pub struct AppState {
    pub sources: CostSources,
    pub backlog_path: PathBuf,
    pub history_days: usize,
}

/// Failure of a request, rendered as `500 {"error": ...}`
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(context: &str, detail: impl std::fmt::Display) -> Self {
        tracing::error!("{}: {}", context, detail);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: context.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::internal("Request worker failed", e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorDto {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Live cost breakdown for the current UTC day
pub async fn get_today_costs(State(state): State<Arc<AppState>>) -> Json<TodayCostsDto> {
    let totals = state.sources.today_costs_concurrent(utc_today()).await;
    Json(TodayCostsDto {
        totals,
        timestamp: now_timestamp(),
    })
}

/// Most recent daily snapshots, oldest first
pub async fn get_cost_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<CostHistoryDto>, ApiError> {
    let days = clamp_history_days(query.days.unwrap_or(state.history_days));

    let sources = state.sources.clone();
    let history = tokio::task::spawn_blocking(move || sources.history(days))
        .await?
        .map_err(|e: CostError| ApiError::internal("Failed to read cost history", e))?;

    Ok(Json(CostHistoryDto {
        days: history,
        timestamp: now_timestamp(),
    }))
}

/// Raw backlog document
pub async fn get_backlog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BacklogDto>, ApiError> {
    let content = load_backlog(&state).await?;
    Ok(Json(BacklogDto {
        content,
        timestamp: now_timestamp(),
    }))
}

/// Backlog split into its `##` sections
pub async fn get_backlog_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BacklogSectionsDto>, ApiError> {
    let content = load_backlog(&state).await?;
    Ok(Json(BacklogSectionsDto {
        sections: split_sections(&content)
            .into_iter()
            .map(Into::into)
            .collect(),
        timestamp: now_timestamp(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn load_backlog(state: &AppState) -> Result<String, ApiError> {
    let path = state.backlog_path.clone();
    tokio::task::spawn_blocking(move || read_backlog(&path))
        .await?
        .map_err(|e| ApiError::internal("Failed to read backlog", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state(root: &Path) -> Arc<AppState> {
        Arc::new(AppState {
            sources: CostSources {
                roster: vec!["main".to_string(), "forge".to_string()],
                sessions_root: root.join("agents"),
                snapshots_root: root.join("cost-reports"),
            },
            backlog_path: root.join("backlog.md"),
            history_days: 7,
        })
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = create_router(state, Path::new("dist-missing"));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn write_snapshot(root: &Path, date: &str) {
        let dir = root.join("cost-reports");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.json", date)),
            format!(r#"{{"date":"{}","totalCost":1.5,"sessions":3}}"#, date),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_today_costs_counts_current_day() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("agents/main/sessions");
        fs::create_dir_all(&dir).unwrap();
        let line = format!(
            r#"{{"type":"message","timestamp":"{}","message":{{"model":"opus","usage":{{"cost":{{"total":0.5}}}}}}}}"#,
            now_timestamp()
        );
        fs::write(dir.join("s.jsonl"), format!("{}\n{{\"type\":\"mess\n", line)).unwrap();

        let (status, body) = get(state(tmp.path()), "/api/costs/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCost"], 0.5);
        assert_eq!(body["byAgent"]["main"]["messages"], 1);
        assert_eq!(body["byModel"]["opus"]["cost"], 0.5);
        assert!(body["date"].is_string());
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_history_empty_without_reports() {
        let tmp = TempDir::new().unwrap();
        let (status, body) = get(state(tmp.path()), "/api/costs/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_history_respects_days_query() {
        let tmp = TempDir::new().unwrap();
        for date in ["2026-02-07", "2026-02-08", "2026-02-09"] {
            write_snapshot(tmp.path(), date);
        }

        let (status, body) = get(state(tmp.path()), "/api/costs/history?days=2").await;
        assert_eq!(status, StatusCode::OK);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["date"], "2026-02-08");
        assert_eq!(days[1]["sessions"], 3);
    }

    #[tokio::test]
    async fn test_history_zero_days_returns_latest_day() {
        let tmp = TempDir::new().unwrap();
        for date in ["2026-02-08", "2026-02-09"] {
            write_snapshot(tmp.path(), date);
        }

        let (status, body) = get(state(tmp.path()), "/api/costs/history?days=0").await;
        assert_eq!(status, StatusCode::OK);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0]["date"], "2026-02-09");
    }

    #[tokio::test]
    async fn test_history_passes_snapshot_through() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("cost-reports");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("2026-02-09.json"),
            r#"{"date":"2026-02-09","totalCost":null,"byAgent":{"main":{"cost":1.0,"tokens":1234}}}"#,
        )
        .unwrap();

        let (status, body) = get(state(tmp.path()), "/api/costs/history").await;
        assert_eq!(status, StatusCode::OK);
        let day = &body["days"][0];
        assert!(day["totalCost"].is_null());
        assert_eq!(day["byAgent"]["main"]["tokens"], 1234);
        assert!(day["byAgent"]["main"].get("messages").is_none());
    }

    #[tokio::test]
    async fn test_history_corrupt_snapshot_is_500() {
        let tmp = TempDir::new().unwrap();
        write_snapshot(tmp.path(), "2026-02-08");
        fs::write(tmp.path().join("cost-reports/2026-02-09.json"), "{oops").unwrap();

        let (status, body) = get(state(tmp.path()), "/api/costs/history").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to read cost history");
    }

    #[tokio::test]
    async fn test_backlog_and_sections() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("backlog.md"),
            "# Backlog\n## Now\n- ship history\n## Done\n",
        )
        .unwrap();

        let (status, body) = get(state(tmp.path()), "/api/backlog").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"].as_str().unwrap().starts_with("# Backlog"));

        let (status, body) = get(state(tmp.path()), "/api/backlog/sections").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0]["name"], "Now");
        assert_eq!(body["sections"][0]["empty"], false);
        assert_eq!(body["sections"][1]["name"], "Done");
        assert_eq!(body["sections"][1]["empty"], true);
    }

    #[tokio::test]
    async fn test_missing_backlog_is_500() {
        let tmp = TempDir::new().unwrap();
        let (status, body) = get(state(tmp.path()), "/api/backlog").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to read backlog");
    }
}
