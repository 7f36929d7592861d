//! User × problem solved matrix.

use std::collections::HashSet;

use super::OrderedGroups;
use crate::config::AnalysisConfig;
use crate::models::{SubmissionTable, UserProblemMatrix};

/// Build the binary solved grid.
///
/// Rows are the first `opts.heatmap_max_users` distinct users in order of
/// first appearance; columns are every problem in the table in order of
/// first appearance. A cell is 1 when the user has at least one accepted
/// submission for the problem and 0 otherwise, including pairs with no
/// submissions at all.
pub fn user_problem_matrix(table: &SubmissionTable, opts: &AnalysisConfig) -> UserProblemMatrix {
    let mut users: OrderedGroups<&str, ()> = OrderedGroups::new();
    let mut problems: OrderedGroups<&str, ()> = OrderedGroups::new();
    let mut solved: HashSet<(&str, &str)> = HashSet::new();

    for row in table {
        if users.len() < opts.heatmap_max_users {
            users.entry(row.user_id.as_str());
        }
        problems.entry(row.problem.as_str());
        if row.is_accepted(&opts.accepted_label) {
            solved.insert((row.user_id.as_str(), row.problem.as_str()));
        }
    }

    let users: Vec<&str> = users.into_vec().into_iter().map(|(u, _)| u).collect();
    let problems: Vec<&str> = problems.into_vec().into_iter().map(|(p, _)| p).collect();

    let cells = users
        .iter()
        .map(|&u| {
            problems
                .iter()
                .map(|&p| u8::from(solved.contains(&(u, p))))
                .collect()
        })
        .collect();

    UserProblemMatrix {
        users: users.into_iter().map(str::to_string).collect(),
        problems: problems.into_iter().map(str::to_string).collect(),
        cells,
    }
}
