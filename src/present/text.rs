//! Plain-text table presenter for terminals.

use std::io::Write;

use super::{PresentError, Presenter, View};

/// Writes each view as a titled, column-aligned text table.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(
        &mut self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), PresentError> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        writeln!(self.out, "== {} ==", title)?;
        let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.write_line(&header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.write_line(&rule, &widths)?;
        for row in rows {
            self.write_line(row, &widths)?;
        }
        if rows.is_empty() {
            writeln!(self.out, "(no data)")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn write_line(&mut self, cells: &[String], widths: &[usize]) -> Result<(), PresentError> {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        writeln!(self.out, "{}", line.join("  ").trim_end())?;
        Ok(())
    }
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, view: &View<'_>) -> Result<(), PresentError> {
        let title = view.title();
        match *view {
            View::Overview(o) => {
                let rate = o.success_rate.map(pct).unwrap_or_else(|| "no data".to_string());
                let rows = vec![
                    vec!["Total Participants".to_string(), o.participant_count.to_string()],
                    vec!["Total Submissions".to_string(), o.submission_count.to_string()],
                    vec!["Overall Success Rate".to_string(), rate],
                    vec!["Total Problems".to_string(), o.problem_count.to_string()],
                ];
                self.write_table(title, &["Metric", "Value"], &rows)
            }
            View::ProblemAcceptance(stats) => {
                let rows: Vec<Vec<String>> = stats
                    .iter()
                    .map(|s| {
                        vec![
                            s.problem.clone(),
                            pct(s.acceptance_rate),
                            s.total_submissions.to_string(),
                        ]
                    })
                    .collect();
                self.write_table(
                    title,
                    &["Problem", "Acceptance Rate", "Total Submissions"],
                    &rows,
                )
            }
            View::ResultDistribution(counts) => {
                let rows: Vec<Vec<String>> = counts
                    .iter()
                    .map(|c| vec![c.value.clone(), c.count.to_string()])
                    .collect();
                self.write_table(title, &["Result", "Count"], &rows)
            }
            View::Leaderboard(entries) => {
                let rows: Vec<Vec<String>> = entries
                    .iter()
                    .map(|e| {
                        vec![
                            e.user_id.clone(),
                            num(e.total_score),
                            e.problems_solved.to_string(),
                            e.total_submissions.to_string(),
                            format!("{:.1}", e.efficiency),
                        ]
                    })
                    .collect();
                self.write_table(
                    title,
                    &[
                        "User ID",
                        "Total Score",
                        "Problems Solved",
                        "Total Submissions",
                        "Efficiency",
                    ],
                    &rows,
                )
            }
            View::LanguageDistribution(counts) => {
                let rows: Vec<Vec<String>> = counts
                    .iter()
                    .map(|c| vec![c.value.clone(), c.count.to_string()])
                    .collect();
                self.write_table(title, &["Language", "Submissions"], &rows)
            }
            View::LanguageSuccess(stats) => {
                let rows: Vec<Vec<String>> = stats
                    .iter()
                    .map(|s| vec![s.language.clone(), pct(s.success_rate)])
                    .collect();
                self.write_table(title, &["Language", "Success Rate"], &rows)
            }
            View::ErrorBreakdown(entries) => {
                let rows: Vec<Vec<String>> = entries
                    .iter()
                    .map(|e| vec![e.problem.clone(), e.result.clone(), e.count.to_string()])
                    .collect();
                self.write_table(title, &["Problem", "Result", "Count"], &rows)
            }
            View::TopErrorUsers(users) => {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|u| vec![u.user_id.clone(), u.error_count.to_string()])
                    .collect();
                self.write_table(title, &["User ID", "Error Count"], &rows)
            }
            View::Attempts(analysis) => {
                let averages: Vec<Vec<String>> = analysis
                    .average_per_problem
                    .iter()
                    .map(|a| vec![a.problem.clone(), format!("{:.2}", a.average_attempts)])
                    .collect();
                self.write_table(title, &["Problem", "Average Attempts"], &averages)?;

                let multi: Vec<Vec<String>> = analysis
                    .top_multi_attempts
                    .iter()
                    .map(|e| vec![e.user_id.clone(), e.problem.clone(), e.attempts.to_string()])
                    .collect();
                self.write_table(
                    "Users with Most Attempts on Single Problem",
                    &["User ID", "Problem", "Attempts"],
                    &multi,
                )
            }
            View::Matrix(matrix) => {
                let mut headers: Vec<&str> = vec!["User ID"];
                headers.extend(matrix.problems.iter().map(String::as_str));
                let rows: Vec<Vec<String>> = matrix
                    .users
                    .iter()
                    .zip(&matrix.cells)
                    .map(|(user, cells)| {
                        let mut row = vec![user.clone()];
                        row.extend(cells.iter().map(|c| c.to_string()));
                        row
                    })
                    .collect();
                self.write_table(title, &headers, &rows)
            }
            View::ScoreHistogram(buckets) => {
                let rows: Vec<Vec<String>> = buckets
                    .iter()
                    .map(|b| {
                        vec![
                            format!("{:.2} - {:.2}", b.lower, b.upper),
                            b.count.to_string(),
                        ]
                    })
                    .collect();
                self.write_table(title, &["Score", "Frequency"], &rows)
            }
            View::Submissions(table) => {
                let headers: Vec<&str> = table.headers().iter().map(String::as_str).collect();
                let rows: Vec<Vec<String>> = table.iter().map(|r| r.values.clone()).collect();
                self.write_table(title, &headers, &rows)
            }
        }
    }
}
