//! Attempts per user and problem.

use super::OrderedGroups;
use crate::config::AnalysisConfig;
use crate::models::{AttemptsAnalysis, AttemptsEntry, ProblemAttempts, SubmissionTable};

/// Count submissions (any result) per (user, problem) and summarise them.
pub fn attempts_per_user_problem(table: &SubmissionTable, opts: &AnalysisConfig) -> AttemptsAnalysis {
    let mut pairs: OrderedGroups<(&str, &str), usize> = OrderedGroups::new();
    for row in table {
        *pairs.entry((row.user_id.as_str(), row.problem.as_str())) += 1;
    }

    let entries: Vec<AttemptsEntry> = pairs
        .into_vec()
        .into_iter()
        .map(|((user_id, problem), attempts)| AttemptsEntry {
            user_id: user_id.to_string(),
            problem: problem.to_string(),
            attempts,
        })
        .collect();

    // problem -> (attempt sum, users)
    let mut per_problem: OrderedGroups<&str, (usize, usize)> = OrderedGroups::new();
    for entry in &entries {
        let (sum, users) = per_problem.entry(entry.problem.as_str());
        *sum += entry.attempts;
        *users += 1;
    }

    let average_per_problem = per_problem
        .into_vec()
        .into_iter()
        .map(|(problem, (sum, users))| ProblemAttempts {
            problem: problem.to_string(),
            average_attempts: sum as f64 / users as f64,
            users,
        })
        .collect();

    let mut top_multi_attempts: Vec<AttemptsEntry> =
        entries.iter().filter(|e| e.attempts > 1).cloned().collect();
    top_multi_attempts.sort_by(|a, b| b.attempts.cmp(&a.attempts));
    top_multi_attempts.truncate(opts.top_multi_attempts);

    AttemptsAnalysis {
        entries,
        average_per_problem,
        top_multi_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::{row, table};

    #[test]
    fn test_attempts_counts_every_result() {
        let t = table(vec![
            row("A", "u1", "Wrong Answer", 0.0),
            row("A", "u1", "Accepted", 10.0),
            row("A", "u2", "Accepted", 10.0),
            row("B", "u1", "Wrong Answer", 0.0),
        ]);

        let analysis = attempts_per_user_problem(&t, &AnalysisConfig::default());
        assert_eq!(
            analysis.entries,
            vec![
                AttemptsEntry {
                    user_id: "u1".to_string(),
                    problem: "A".to_string(),
                    attempts: 2,
                },
                AttemptsEntry {
                    user_id: "u2".to_string(),
                    problem: "A".to_string(),
                    attempts: 1,
                },
                AttemptsEntry {
                    user_id: "u1".to_string(),
                    problem: "B".to_string(),
                    attempts: 1,
                },
            ]
        );
        assert_eq!(
            analysis.entries.iter().map(|e| e.attempts).sum::<usize>(),
            t.len()
        );
    }

    #[test]
    fn test_average_attempts_per_problem() {
        let t = table(vec![
            row("A", "u1", "Wrong Answer", 0.0),
            row("A", "u1", "Wrong Answer", 0.0),
            row("A", "u1", "Accepted", 10.0),
            row("A", "u2", "Accepted", 10.0),
            row("B", "u2", "Accepted", 10.0),
        ]);

        let analysis = attempts_per_user_problem(&t, &AnalysisConfig::default());
        assert_eq!(analysis.average_per_problem.len(), 2);
        assert_eq!(analysis.average_per_problem[0].problem, "A");
        assert_eq!(analysis.average_per_problem[0].average_attempts, 2.0);
        assert_eq!(analysis.average_per_problem[0].users, 2);
        assert_eq!(analysis.average_per_problem[1].average_attempts, 1.0);
    }

    #[test]
    fn test_top_multi_attempts() {
        let mut rows = Vec::new();
        for i in 0..12 {
            for _ in 0..(i + 1) {
                rows.push(row("A", &format!("user{}", i), "Wrong Answer", 0.0));
            }
        }

        let analysis = attempts_per_user_problem(&table(rows), &AnalysisConfig::default());
        let top = &analysis.top_multi_attempts;
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].user_id, "user11");
        assert_eq!(top[0].attempts, 12);
        assert!(top.iter().all(|e| e.attempts > 1));
        assert!(top.windows(2).all(|w| w[0].attempts >= w[1].attempts));
    }

    #[test]
    fn test_top_multi_attempts_excludes_single() {
        let t = table(vec![row("A", "u1", "Accepted", 10.0)]);
        let analysis = attempts_per_user_problem(&t, &AnalysisConfig::default());
        assert!(analysis.top_multi_attempts.is_empty());
    }
}
