//! Derived view endpoints. Every request recomputes from the session's
//! table snapshot.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{parse_session_id, run_blocking, ApiError};
use crate::calculate;
use crate::config::AnalysisConfig;
use crate::models::{
    AttemptsAnalysis, DashboardViews, ErrorBreakdownEntry, LanguageStats, LeaderboardEntry,
    OverviewMetrics, ProblemStats, ScoreHistogramBucket, SubmissionTable, UserErrorCount,
    UserProblemMatrix, ValueCount,
};

/// Resolve the session and run `view` over its snapshot on the blocking
/// pool.
async fn compute<T, F>(state: &AppState, raw_id: &str, view: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce(&SubmissionTable, &AnalysisConfig) -> T + Send + 'static,
    T: Send + 'static,
{
    let id = parse_session_id(raw_id)?;
    let table = state.table(&id).await?;
    let analysis = state.analysis.clone();
    let view = run_blocking(move || view(&table, &analysis)).await?;
    Ok(Json(view))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardViews>, ApiError> {
    compute(&state, &id, DashboardViews::compute).await
}

pub async fn overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OverviewMetrics>, ApiError> {
    compute(&state, &id, calculate::overview_metrics).await
}

pub async fn problems(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProblemStats>>, ApiError> {
    compute(&state, &id, calculate::problem_acceptance).await
}

pub async fn results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ValueCount>>, ApiError> {
    compute(&state, &id, |t, _| calculate::result_distribution(t)).await
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    compute(&state, &id, calculate::leaderboard).await
}

pub async fn languages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ValueCount>>, ApiError> {
    compute(&state, &id, |t, _| calculate::language_distribution(t)).await
}

pub async fn language_success(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LanguageStats>>, ApiError> {
    compute(&state, &id, calculate::language_success_rate).await
}

pub async fn errors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ErrorBreakdownEntry>>, ApiError> {
    compute(&state, &id, calculate::error_breakdown).await
}

pub async fn error_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserErrorCount>>, ApiError> {
    compute(&state, &id, calculate::top_error_users).await
}

pub async fn attempts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AttemptsAnalysis>, ApiError> {
    compute(&state, &id, calculate::attempts_per_user_problem).await
}

pub async fn matrix(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProblemMatrix>, ApiError> {
    compute(&state, &id, calculate::user_problem_matrix).await
}

pub async fn histogram(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ScoreHistogramBucket>>, ApiError> {
    compute(&state, &id, |t, opts| {
        calculate::score_histogram(t, opts.histogram_bins)
    })
    .await
}
