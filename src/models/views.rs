//! Derived view models.
//!
//! Every view is a pure projection of a `SubmissionTable`, recomputed on
//! demand and replaced wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SubmissionTable;

/// Headline numbers for the whole log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    /// Distinct users/teams
    pub participant_count: usize,

    /// Total rows
    pub submission_count: usize,

    /// Accepted share in percent; `None` when there are no submissions
    pub success_rate: Option<f64>,

    /// Distinct problems
    pub problem_count: usize,
}

/// Per-problem acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemStats {
    pub problem: String,

    /// Accepted submissions / all submissions, in percent
    pub acceptance_rate: f64,

    pub accepted: usize,

    pub total_submissions: usize,
}

/// Count of rows carrying one distinct value (result, language, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,

    /// Sum of scores over accepted submissions
    pub total_score: f64,

    /// Distinct problems with an accepted submission
    pub problems_solved: usize,

    /// Accepted submissions
    pub total_submissions: usize,

    /// problems_solved / total_submissions in percent, one decimal
    pub efficiency: f64,
}

/// Success rate for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language: String,
    pub success_rate: f64,
    pub accepted: usize,
    pub total: usize,
}

/// Failed submissions for one (problem, result) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBreakdownEntry {
    pub problem: String,
    pub result: String,
    pub count: usize,
}

/// Failed submissions for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserErrorCount {
    pub user_id: String,
    pub error_count: usize,
}

/// Submissions (any result) by one user on one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptsEntry {
    pub user_id: String,
    pub problem: String,
    pub attempts: usize,
}

/// Mean attempts per user on one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemAttempts {
    pub problem: String,
    pub average_attempts: f64,

    /// Users who attempted the problem at least once
    pub users: usize,
}

/// Attempts analysis bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptsAnalysis {
    /// Every (user, problem) pair, in first-appearance order
    pub entries: Vec<AttemptsEntry>,

    pub average_per_problem: Vec<ProblemAttempts>,

    /// Pairs with more than one attempt, most attempts first
    pub top_multi_attempts: Vec<AttemptsEntry>,
}

/// Binary solved/unsolved grid of users × problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProblemMatrix {
    pub users: Vec<String>,
    pub problems: Vec<String>,

    /// `cells[u][p]` is 1 when `users[u]` has an accepted submission for
    /// `problems[p]`, else 0
    pub cells: Vec<Vec<u8>>,
}

impl UserProblemMatrix {
    /// Look up a cell by user and problem name.
    pub fn cell(&self, user_id: &str, problem: &str) -> Option<u8> {
        let u = self.users.iter().position(|x| x == user_id)?;
        let p = self.problems.iter().position(|x| x == problem)?;
        Some(self.cells[u][p])
    }
}

/// One equal-width score bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Distinct filter values, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub problems: Vec<String>,
    pub results: Vec<String>,
}

/// Raw rows of a (filtered) table, as shown in the detail grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionsView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SubmissionsView {
    pub fn from_table(table: &SubmissionTable) -> Self {
        Self {
            headers: table.headers().to_vec(),
            rows: table.iter().map(|r| r.values.clone()).collect(),
        }
    }
}

/// The full dashboard catalog for one table snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardViews {
    /// When these views were computed
    pub computed_at: DateTime<Utc>,

    pub overview: OverviewMetrics,
    pub problems: Vec<ProblemStats>,
    pub result_distribution: Vec<ValueCount>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub language_distribution: Vec<ValueCount>,
    pub language_success: Vec<LanguageStats>,
    pub error_breakdown: Vec<ErrorBreakdownEntry>,
    pub top_error_users: Vec<UserErrorCount>,
    pub attempts: AttemptsAnalysis,
    pub matrix: UserProblemMatrix,
    pub score_histogram: Vec<ScoreHistogramBucket>,
    pub filters: FilterOptions,
}
