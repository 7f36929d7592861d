//! Row filtering by problem and result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OrderedGroups;
use crate::models::{FilterOptions, SubmissionTable};

/// Rows whose problem is in `problems` and whose result is in `results`.
/// Row order and every original column are preserved.
pub fn filter_rows(
    table: &SubmissionTable,
    problems: &HashSet<String>,
    results: &HashSet<String>,
) -> SubmissionTable {
    let rows = table
        .iter()
        .filter(|r| problems.contains(r.problem.as_str()) && results.contains(r.result.as_str()))
        .cloned()
        .collect();

    table.with_rows(rows)
}

/// Distinct problems and results, in order of first appearance.
pub fn filter_options(table: &SubmissionTable) -> FilterOptions {
    let mut problems: OrderedGroups<&str, ()> = OrderedGroups::new();
    let mut results: OrderedGroups<&str, ()> = OrderedGroups::new();
    for row in table {
        problems.entry(row.problem.as_str());
        results.entry(row.result.as_str());
    }

    FilterOptions {
        problems: problems.into_vec().into_iter().map(|(p, _)| p.to_string()).collect(),
        results: results.into_vec().into_iter().map(|(r, _)| r.to_string()).collect(),
    }
}

/// A user's filter choice. `None` means every value is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub problems: Option<Vec<String>>,

    #[serde(default)]
    pub results: Option<Vec<String>>,
}

impl FilterSelection {
    /// Resolve defaults against `table` and filter it.
    pub fn apply(&self, table: &SubmissionTable) -> SubmissionTable {
        let options = filter_options(table);
        let problems: HashSet<String> = self
            .problems
            .clone()
            .unwrap_or(options.problems)
            .into_iter()
            .collect();
        let results: HashSet<String> = self
            .results
            .clone()
            .unwrap_or(options.results)
            .into_iter()
            .collect();

        let filtered = filter_rows(table, &problems, &results);
        debug!("Filter kept {} of {} rows", filtered.len(), table.len());
        filtered
    }
}
