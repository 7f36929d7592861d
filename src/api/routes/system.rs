use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::models::Column;
use crate::storage::EXPECTED_FORMAT;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await.len();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions,
    })
}

/// Idle-state prompt: what to upload and what it should look like.
#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub message: &'static str,
    pub accepted_extensions: Vec<&'static str>,
    pub required_columns: Vec<&'static str>,
    pub example: &'static str,
}

pub async fn expected_format() -> Json<FormatResponse> {
    Json(FormatResponse {
        message: "Please upload a CSV file to begin analysis",
        accepted_extensions: vec![".csv"],
        required_columns: Column::REQUIRED.iter().map(|c| c.header()).collect(),
        example: EXPECTED_FORMAT,
    })
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get_json, test_app, upload, SAMPLE_CSV};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_counts_sessions() {
        let (_, app) = test_app();
        let (status, json) = get_json(app.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sessions"], 0);

        upload(app.clone(), SAMPLE_CSV).await;
        let (_, json) = get_json(app, "/api/health").await;
        assert_eq!(json["sessions"], 1);
    }

    #[tokio::test]
    async fn test_expected_format() {
        let (_, app) = test_app();
        let (status, json) = get_json(app, "/api/format").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["required_columns"].as_array().unwrap().len(), 9);
        assert_eq!(json["required_columns"][1], "Team/User ID");
        assert!(json["example"]
            .as_str()
            .unwrap()
            .contains("The Power Sum,user123"));
    }
}
