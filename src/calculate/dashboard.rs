//! Full dashboard computation.

use chrono::Utc;
use tracing::debug;

use super::*;
use crate::config::AnalysisConfig;
use crate::models::{DashboardViews, SubmissionTable};

impl DashboardViews {
    /// Compute every view for one table snapshot.
    pub fn compute(table: &SubmissionTable, opts: &AnalysisConfig) -> Self {
        debug!("Computing dashboard over {} submissions", table.len());

        Self {
            computed_at: Utc::now(),
            overview: overview_metrics(table, opts),
            problems: problem_acceptance(table, opts),
            result_distribution: result_distribution(table),
            leaderboard: leaderboard(table, opts),
            language_distribution: language_distribution(table),
            language_success: language_success_rate(table, opts),
            error_breakdown: error_breakdown(table, opts),
            top_error_users: top_error_users(table, opts),
            attempts: attempts_per_user_problem(table, opts),
            matrix: user_problem_matrix(table, opts),
            score_histogram: score_histogram(table, opts.histogram_bins),
            filters: filter_options(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::scenario;

    #[test]
    fn test_dashboard_scenario() {
        let views = DashboardViews::compute(&scenario(), &AnalysisConfig::default());

        assert_eq!(views.overview.submission_count, 3);
        assert_eq!(views.overview.participant_count, 1);
        assert_eq!(views.problems[0].acceptance_rate, 50.0);
        assert_eq!(views.leaderboard.len(), 1);
        assert_eq!(views.leaderboard[0].total_score, 15.0);
        assert_eq!(views.error_breakdown.len(), 1);
        assert_eq!(views.matrix.cells, vec![vec![1, 1]]);
        assert_eq!(views.score_histogram.len(), 20);
        assert_eq!(views.filters.problems, vec!["A", "B"]);
    }

    #[test]
    fn test_dashboard_serializes() {
        let views = DashboardViews::compute(&scenario(), &AnalysisConfig::default());
        let json = serde_json::to_value(&views).unwrap();

        assert_eq!(json["overview"]["problem_count"], 2);
        assert_eq!(json["leaderboard"][0]["efficiency"], 100.0);
        assert!(json["computed_at"].is_string());
    }
}
