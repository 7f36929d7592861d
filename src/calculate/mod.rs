//! Aggregation engine.
//!
//! Computes derived views from a loaded submission table:
//! - Overview metrics and per-problem acceptance
//! - Result and language distributions
//! - Leaderboard
//! - Error and attempt analysis
//! - User × problem solved matrix and score histogram
//! - Row filtering for display and export
//!
//! Every function is a pure pass over an immutable `SubmissionTable`.

mod attempts;
mod dashboard;
mod distribution;
mod errors;
mod filter;
mod histogram;
mod leaderboard;
mod matrix;

pub use attempts::attempts_per_user_problem;
pub use distribution::{
    language_distribution, language_success_rate, overview_metrics, problem_acceptance,
    result_distribution,
};
pub use errors::{error_breakdown, top_error_users};
pub use filter::{filter_options, filter_rows, FilterSelection};
pub use histogram::score_histogram;
pub use leaderboard::leaderboard;
pub use matrix::user_problem_matrix;

use std::collections::HashMap;
use std::hash::Hash;

/// `part / total` in percent, or `None` when there is nothing to divide by.
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}

/// Round to one decimal place, halves going to the even neighbour.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Groups that remember the order in which their keys first appeared.
pub(crate) struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, V)>,
}

impl<K: Hash + Eq + Clone, V: Default> OrderedGroups<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Accumulator for `key`, created on first sight.
    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.groups.len();
                self.index.insert(key.clone(), i);
                self.groups.push((key, V::default()));
                i
            }
        };
        &mut self.groups[i].1
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn into_vec(self) -> Vec<(K, V)> {
        self.groups
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{SubmissionRow, SubmissionTable};

    pub fn row(problem: &str, user: &str, result: &str, score: f64) -> SubmissionRow {
        lang_row(problem, user, "java15", result, score)
    }

    pub fn lang_row(
        problem: &str,
        user: &str,
        language: &str,
        result: &str,
        score: f64,
    ) -> SubmissionRow {
        SubmissionRow::new(
            problem, user, "0", language, 100.0, result, score, "Yes", "Yes",
        )
    }

    pub fn table(rows: Vec<SubmissionRow>) -> SubmissionTable {
        SubmissionTable::from_rows(rows)
    }

    /// The three-row scenario used across the engine tests.
    pub fn scenario() -> SubmissionTable {
        table(vec![
            row("A", "u1", "Accepted", 10.0),
            row("A", "u1", "WA", 0.0),
            row("B", "u1", "Accepted", 5.0),
        ])
    }
}
