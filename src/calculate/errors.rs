//! Error analysis over non-accepted submissions.

use super::OrderedGroups;
use crate::config::AnalysisConfig;
use crate::models::{ErrorBreakdownEntry, SubmissionRow, SubmissionTable, UserErrorCount};

fn failed<'a>(
    table: &'a SubmissionTable,
    opts: &'a AnalysisConfig,
) -> impl Iterator<Item = &'a SubmissionRow> + 'a {
    table
        .iter()
        .filter(move |r| !r.is_accepted(&opts.accepted_label))
}

/// Failed submissions per (problem, result), in first-appearance order.
pub fn error_breakdown(table: &SubmissionTable, opts: &AnalysisConfig) -> Vec<ErrorBreakdownEntry> {
    let mut groups: OrderedGroups<(&str, &str), usize> = OrderedGroups::new();
    for row in failed(table, opts) {
        *groups.entry((row.problem.as_str(), row.result.as_str())) += 1;
    }

    groups
        .into_vec()
        .into_iter()
        .map(|((problem, result), count)| ErrorBreakdownEntry {
            problem: problem.to_string(),
            result: result.to_string(),
            count,
        })
        .collect()
}

/// Users with the most failed submissions.
pub fn top_error_users(table: &SubmissionTable, opts: &AnalysisConfig) -> Vec<UserErrorCount> {
    let mut groups: OrderedGroups<&str, usize> = OrderedGroups::new();
    for row in failed(table, opts) {
        *groups.entry(row.user_id.as_str()) += 1;
    }

    let mut users: Vec<UserErrorCount> = groups
        .into_vec()
        .into_iter()
        .map(|(user_id, error_count)| UserErrorCount {
            user_id: user_id.to_string(),
            error_count,
        })
        .collect();
    users.sort_by(|a, b| b.error_count.cmp(&a.error_count));
    users.truncate(opts.top_error_users);
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::{row, scenario, table};

    #[test]
    fn test_error_breakdown_groups() {
        let t = table(vec![
            row("A", "u1", "Wrong Answer", 0.0),
            row("A", "u2", "Accepted", 10.0),
            row("B", "u1", "Runtime Error", 0.0),
            row("A", "u3", "Wrong Answer", 0.0),
            row("A", "u3", "Time Limit Exceeded", 0.0),
        ]);

        let breakdown = error_breakdown(&t, &AnalysisConfig::default());
        assert_eq!(
            breakdown,
            vec![
                ErrorBreakdownEntry {
                    problem: "A".to_string(),
                    result: "Wrong Answer".to_string(),
                    count: 2,
                },
                ErrorBreakdownEntry {
                    problem: "B".to_string(),
                    result: "Runtime Error".to_string(),
                    count: 1,
                },
                ErrorBreakdownEntry {
                    problem: "A".to_string(),
                    result: "Time Limit Exceeded".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_error_breakdown_scenario() {
        let breakdown = error_breakdown(&scenario(), &AnalysisConfig::default());
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].result, "WA");
    }

    #[test]
    fn test_top_error_users() {
        let mut rows = vec![row("A", "clean", "Accepted", 10.0)];
        for i in 0..12 {
            for _ in 0..=i {
                rows.push(row("A", &format!("user{}", i), "Wrong Answer", 0.0));
            }
        }

        let users = top_error_users(&table(rows), &AnalysisConfig::default());
        assert_eq!(users.len(), 10);
        assert_eq!(users[0].user_id, "user11");
        assert_eq!(users[0].error_count, 12);
        assert!(users.windows(2).all(|w| w[0].error_count >= w[1].error_count));
        assert!(users.iter().all(|u| u.user_id != "clean"));
    }
}
