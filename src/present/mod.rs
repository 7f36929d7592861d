//! Presentation boundary.
//!
//! Views leave the engine through a single `Presenter::present` call:
//! - `JsonPresenter` collects views into one JSON document
//! - `TextPresenter` writes aligned plain-text tables

mod json;
mod text;

pub use json::JsonPresenter;
pub use text::TextPresenter;

use thiserror::Error;

use crate::models::{
    AttemptsAnalysis, DashboardViews, ErrorBreakdownEntry, LanguageStats, LeaderboardEntry,
    OverviewMetrics, ProblemStats, ScoreHistogramBucket, SubmissionTable, UserErrorCount,
    UserProblemMatrix, ValueCount,
};

/// Presentation errors.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize view: {0}")]
    Json(#[from] serde_json::Error),
}

/// A borrowed view ready to be presented.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Overview(&'a OverviewMetrics),
    ProblemAcceptance(&'a [ProblemStats]),
    ResultDistribution(&'a [ValueCount]),
    Leaderboard(&'a [LeaderboardEntry]),
    LanguageDistribution(&'a [ValueCount]),
    LanguageSuccess(&'a [LanguageStats]),
    ErrorBreakdown(&'a [ErrorBreakdownEntry]),
    TopErrorUsers(&'a [UserErrorCount]),
    Attempts(&'a AttemptsAnalysis),
    Matrix(&'a UserProblemMatrix),
    ScoreHistogram(&'a [ScoreHistogramBucket]),
    Submissions(&'a SubmissionTable),
}

impl View<'_> {
    /// Stable machine name.
    pub fn name(&self) -> &'static str {
        match self {
            View::Overview(_) => "overview",
            View::ProblemAcceptance(_) => "problems",
            View::ResultDistribution(_) => "result_distribution",
            View::Leaderboard(_) => "leaderboard",
            View::LanguageDistribution(_) => "language_distribution",
            View::LanguageSuccess(_) => "language_success",
            View::ErrorBreakdown(_) => "error_breakdown",
            View::TopErrorUsers(_) => "top_error_users",
            View::Attempts(_) => "attempts",
            View::Matrix(_) => "matrix",
            View::ScoreHistogram(_) => "score_histogram",
            View::Submissions(_) => "submissions",
        }
    }

    /// Human-facing heading.
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview(_) => "Overview Metrics",
            View::ProblemAcceptance(_) => "Problem-wise Acceptance Rate",
            View::ResultDistribution(_) => "Result Distribution",
            View::Leaderboard(_) => "Top Performers Leaderboard",
            View::LanguageDistribution(_) => "Language Distribution",
            View::LanguageSuccess(_) => "Success Rate by Language",
            View::ErrorBreakdown(_) => "Error Analysis",
            View::TopErrorUsers(_) => "Users with Most Errors",
            View::Attempts(_) => "Multiple Attempts Analysis",
            View::Matrix(_) => "User-Problem Performance Heatmap",
            View::ScoreHistogram(_) => "Score Distribution",
            View::Submissions(_) => "Detailed Submission Data",
        }
    }
}

/// Something that can render a view: a terminal, a JSON document, a chart
/// frontend.
pub trait Presenter {
    fn present(&mut self, view: &View<'_>) -> Result<(), PresentError>;
}

/// Present every dashboard view in display order.
pub fn present_dashboard<P: Presenter + ?Sized>(
    presenter: &mut P,
    views: &DashboardViews,
) -> Result<(), PresentError> {
    let ordered = [
        View::Overview(&views.overview),
        View::ProblemAcceptance(&views.problems),
        View::ResultDistribution(&views.result_distribution),
        View::Leaderboard(&views.leaderboard),
        View::LanguageDistribution(&views.language_distribution),
        View::LanguageSuccess(&views.language_success),
        View::ErrorBreakdown(&views.error_breakdown),
        View::TopErrorUsers(&views.top_error_users),
        View::Attempts(&views.attempts),
        View::Matrix(&views.matrix),
        View::ScoreHistogram(&views.score_histogram),
    ];

    for view in &ordered {
        presenter.present(view)?;
    }
    Ok(())
}
