//! Top performers by accepted score.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use super::{percentage, round1, OrderedGroups};
use crate::config::AnalysisConfig;
use crate::models::{LeaderboardEntry, SubmissionTable};

#[derive(Default)]
struct UserAgg<'a> {
    total_score: f64,
    problems: HashSet<&'a str>,
    submissions: usize,
}

/// Rank users over their accepted submissions.
///
/// Sorted by total score, then problems solved, both descending; users that
/// tie on both keep the order in which they first appear. At most
/// `opts.leaderboard_size` entries are returned.
pub fn leaderboard(table: &SubmissionTable, opts: &AnalysisConfig) -> Vec<LeaderboardEntry> {
    let mut users: OrderedGroups<&str, UserAgg> = OrderedGroups::new();

    for row in table
        .iter()
        .filter(|r| r.is_accepted(&opts.accepted_label))
    {
        let agg = users.entry(row.user_id.as_str());
        agg.total_score += row.score;
        agg.problems.insert(row.problem.as_str());
        agg.submissions += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = users
        .into_vec()
        .into_iter()
        .map(|(user_id, agg)| {
            let problems_solved = agg.problems.len();
            LeaderboardEntry {
                user_id: user_id.to_string(),
                total_score: agg.total_score,
                problems_solved,
                total_submissions: agg.submissions,
                efficiency: percentage(problems_solved, agg.submissions)
                    .map(round1)
                    .unwrap_or(0.0),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.problems_solved.cmp(&a.problems_solved))
    });

    debug!("Ranked {} users with accepted submissions", entries.len());
    entries.truncate(opts.leaderboard_size);
    entries
}
