//! Overview metrics, acceptance rates and value distributions.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{percentage, OrderedGroups};
use crate::config::AnalysisConfig;
use crate::models::{LanguageStats, OverviewMetrics, ProblemStats, SubmissionTable, ValueCount};

/// Headline counts and the overall success rate.
pub fn overview_metrics(table: &SubmissionTable, opts: &AnalysisConfig) -> OverviewMetrics {
    let users: HashSet<&str> = table.iter().map(|r| r.user_id.as_str()).collect();
    let problems: HashSet<&str> = table.iter().map(|r| r.problem.as_str()).collect();
    let accepted = table
        .iter()
        .filter(|r| r.is_accepted(&opts.accepted_label))
        .count();

    OverviewMetrics {
        participant_count: users.len(),
        submission_count: table.len(),
        success_rate: percentage(accepted, table.len()),
        problem_count: problems.len(),
    }
}

/// Acceptance rate per problem, in order of first appearance.
pub fn problem_acceptance(table: &SubmissionTable, opts: &AnalysisConfig) -> Vec<ProblemStats> {
    // problem -> (accepted, total)
    let mut groups: OrderedGroups<&str, (usize, usize)> = OrderedGroups::new();
    for row in table {
        let (accepted, total) = groups.entry(row.problem.as_str());
        *total += 1;
        if row.is_accepted(&opts.accepted_label) {
            *accepted += 1;
        }
    }

    groups
        .into_vec()
        .into_iter()
        .map(|(problem, (accepted, total))| ProblemStats {
            problem: problem.to_string(),
            acceptance_rate: percentage(accepted, total).unwrap_or(0.0),
            accepted,
            total_submissions: total,
        })
        .collect()
}

/// Count rows per value, most frequent first; ties keep first appearance.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut groups: OrderedGroups<&str, usize> = OrderedGroups::new();
    for value in values {
        *groups.entry(value) += 1;
    }

    let mut counts: Vec<ValueCount> = groups
        .into_vec()
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Rows per distinct result value.
pub fn result_distribution(table: &SubmissionTable) -> Vec<ValueCount> {
    value_counts(table.iter().map(|r| r.result.as_str()))
}

/// Rows per distinct language.
pub fn language_distribution(table: &SubmissionTable) -> Vec<ValueCount> {
    value_counts(table.iter().map(|r| r.language.as_str()))
}

/// Success rate per language, highest first.
pub fn language_success_rate(table: &SubmissionTable, opts: &AnalysisConfig) -> Vec<LanguageStats> {
    let mut groups: OrderedGroups<&str, (usize, usize)> = OrderedGroups::new();
    for row in table {
        let (accepted, total) = groups.entry(row.language.as_str());
        *total += 1;
        if row.is_accepted(&opts.accepted_label) {
            *accepted += 1;
        }
    }

    let mut stats: Vec<LanguageStats> = groups
        .into_vec()
        .into_iter()
        .map(|(language, (accepted, total))| LanguageStats {
            language: language.to_string(),
            success_rate: percentage(accepted, total).unwrap_or(0.0),
            accepted,
            total,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(Ordering::Equal)
    });
    stats
}
