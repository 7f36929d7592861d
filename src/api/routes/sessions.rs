use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::{parse_session_id, run_blocking, ApiError};
use crate::models::{SessionId, SubmissionTable};
use crate::storage::{load_csv, require_submissions};

/// Multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub rows: usize,
    pub columns: Vec<String>,
}

impl SessionResponse {
    fn new(
        session_id: SessionId,
        file_name: Option<String>,
        created_at: DateTime<Utc>,
        table: &SubmissionTable,
    ) -> Self {
        Self {
            session_id,
            file_name,
            created_at,
            rows: table.len(),
            columns: table.headers().to_vec(),
        }
    }
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        if let Some(name) = &file_name {
            if !name.to_ascii_lowercase().ends_with(".csv") {
                return Err(ApiError::BadRequest(format!(
                    "Expected a .csv file, got '{}'",
                    name
                )));
            }
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        return Ok(Upload { file_name, data });
    }

    Err(ApiError::BadRequest(format!(
        "No file uploaded; expected a multipart field named '{}'",
        FILE_FIELD
    )))
}

/// Parse an upload off the async runtime.
async fn load_upload(upload: &Upload) -> Result<Arc<SubmissionTable>, ApiError> {
    let data = upload.data.clone();
    let table = run_blocking(move || load_csv(data.as_ref()).and_then(require_submissions))
        .await?
        .map_err(|e| {
            warn!("Rejected upload {:?}: {}", upload.file_name, e);
            ApiError::from(e)
        })?;
    Ok(Arc::new(table))
}

pub async fn create_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let upload = read_upload(multipart).await?;
    let table = load_upload(&upload).await?;

    let id = SessionId::generate();
    let created_at = Utc::now();
    let evicted = state
        .sessions
        .write()
        .await
        .insert(id, table.clone(), upload.file_name.clone(), created_at);
    if let Some(evicted) = evicted {
        warn!("Session store full, evicted session {}", evicted);
    }

    info!("Created session {} with {} submissions", id, table.len());
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(id, upload.file_name, created_at, &table)),
    ))
}

pub async fn replace_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let upload = read_upload(multipart).await?;
    let table = load_upload(&upload).await?;

    let created_at = state
        .sessions
        .write()
        .await
        .replace(&id, table.clone(), upload.file_name.clone())
        .ok_or_else(|| ApiError::NotFound(format!("Session {}", id)))?;

    info!("Replaced table of session {} ({} submissions)", id, table.len());
    Ok(Json(SessionResponse::new(
        id,
        upload.file_name,
        created_at,
        &table,
    )))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    if state.sessions.write().await.remove(&id) {
        info!("Discarded session {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::api::test_support::{
        get_json, multipart_body, send_multipart, test_app, upload, SAMPLE_CSV,
    };

    #[tokio::test]
    async fn test_create_session() {
        let (state, app) = test_app();
        let body = multipart_body("file", "contest.csv", SAMPLE_CSV);
        let (status, json) = send_multipart(app, "POST", "/api/sessions", body).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["rows"], 4);
        assert_eq!(json["file_name"], "contest.csv");
        assert_eq!(json["columns"][0], "Problem");
        assert!(json["created_at"].is_string());
        assert_eq!(state.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_session_missing_column() {
        let (state, app) = test_app();
        let csv = "Problem,Team/User ID,Submission ID,Language,Time,Status,During Contest\n\
                   A,u1,1,c,1,Yes,Yes\n";
        let body = multipart_body("file", "contest.csv", csv);
        let (status, json) = send_multipart(app, "POST", "/api/sessions", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Missing required column(s): Result, Score"));
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_session_header_only() {
        let (_, app) = test_app();
        let csv = SAMPLE_CSV.lines().next().unwrap();
        let body = multipart_body("file", "contest.csv", csv);
        let (status, json) = send_multipart(app, "POST", "/api/sessions", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("no submissions"));
    }

    #[tokio::test]
    async fn test_create_session_wrong_field() {
        let (_, app) = test_app();
        let body = multipart_body("upload", "contest.csv", SAMPLE_CSV);
        let (status, _) = send_multipart(app, "POST", "/api/sessions", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_session_rejects_non_csv() {
        let (_, app) = test_app();
        let body = multipart_body("file", "contest.xlsx", SAMPLE_CSV);
        let (status, json) = send_multipart(app, "POST", "/api/sessions", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"].as_str().unwrap().contains(".csv"));
    }

    #[tokio::test]
    async fn test_replace_session() {
        let (state, app) = test_app();
        let id = upload(app.clone(), SAMPLE_CSV).await;
        let created_at = {
            let store = state.sessions.read().await;
            store.get(&id.parse().unwrap()).unwrap().created_at
        };

        let smaller = "Problem,Team/User ID,Submission ID,Language,Time,Result,Score,Status,During Contest\n\
                       Z,u9,1,c,1,Accepted,3,Yes,Yes\n";
        let body = multipart_body("file", "new.csv", smaller);
        let uri = format!("/api/sessions/{}", id);
        let (status, json) = send_multipart(app.clone(), "PUT", &uri, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"], 1);
        assert_eq!(json["created_at"], serde_json::to_value(created_at).unwrap());

        let (_, overview) = get_json(app, &format!("/api/sessions/{}/overview", id)).await;
        assert_eq!(overview["submission_count"], 1);
    }

    #[tokio::test]
    async fn test_replace_unknown_session() {
        let (_, app) = test_app();
        let body = multipart_body("file", "new.csv", SAMPLE_CSV);
        let uri = format!("/api/sessions/{}", crate::models::SessionId::generate());
        let (status, _) = send_multipart(app, "PUT", &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (_, app) = test_app();
        let id = upload(app.clone(), SAMPLE_CSV).await;
        let uri = format!("/api/sessions/{}", id);

        let delete = || {
            Request::builder()
                .method("DELETE")
                .uri(uri.as_str())
                .body(Body::empty())
                .unwrap()
        };

        let resp = app.clone().oneshot(delete()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app.clone().oneshot(delete()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let (status, _) = get_json(app, &format!("{}/dashboard", uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
