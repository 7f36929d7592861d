//! Submission log rows and the immutable table that holds them.

use serde::Serialize;
use std::fmt;

/// The canonical columns every submission log must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Problem,
    UserId,
    SubmissionId,
    Language,
    Time,
    Result,
    Score,
    Status,
    DuringContest,
}

impl Column {
    pub const COUNT: usize = 9;

    /// All required columns, in the order of the reference export header.
    pub const REQUIRED: [Column; Column::COUNT] = [
        Column::Problem,
        Column::UserId,
        Column::SubmissionId,
        Column::Language,
        Column::Time,
        Column::Result,
        Column::Score,
        Column::Status,
        Column::DuringContest,
    ];

    /// Header name as it appears in the CSV (after trimming).
    pub fn header(&self) -> &'static str {
        match self {
            Column::Problem => "Problem",
            Column::UserId => "Team/User ID",
            Column::SubmissionId => "Submission ID",
            Column::Language => "Language",
            Column::Time => "Time",
            Column::Result => "Result",
            Column::Score => "Score",
            Column::Status => "Status",
            Column::DuringContest => "During Contest",
        }
    }

    /// Canonical header list.
    pub fn canonical_headers() -> Vec<String> {
        Self::REQUIRED.iter().map(|c| c.header().to_string()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One contest submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRow {
    /// Problem title
    pub problem: String,

    /// Team or user handle
    pub user_id: String,

    /// Submission identifier (unique per row)
    pub submission_id: String,

    /// Language tag, e.g. "java15"
    pub language: String,

    /// Reported execution time
    pub time: f64,

    /// Judge verdict; "Accepted" marks success
    pub result: String,

    /// Points awarded
    pub score: f64,

    pub status: String,

    /// Boolean-like "Yes"/"No" flag as exported
    pub during_contest: String,

    /// Every raw field of the source record, in header order
    #[serde(skip)]
    pub values: Vec<String>,
}

impl SubmissionRow {
    /// Build a row laid out in the canonical column order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        problem: &str,
        user_id: &str,
        submission_id: &str,
        language: &str,
        time: f64,
        result: &str,
        score: f64,
        status: &str,
        during_contest: &str,
    ) -> Self {
        let values = vec![
            problem.to_string(),
            user_id.to_string(),
            submission_id.to_string(),
            language.to_string(),
            time.to_string(),
            result.to_string(),
            score.to_string(),
            status.to_string(),
            during_contest.to_string(),
        ];

        Self {
            problem: problem.to_string(),
            user_id: user_id.to_string(),
            submission_id: submission_id.to_string(),
            language: language.to_string(),
            time,
            result: result.to_string(),
            score,
            status: status.to_string(),
            during_contest: during_contest.to_string(),
            values,
        }
    }

    /// Whether this submission carries the given success label.
    pub fn is_accepted(&self, accepted_label: &str) -> bool {
        self.result == accepted_label
    }
}

/// An ordered, read-only snapshot of submission rows sharing one header.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTable {
    headers: Vec<String>,
    rows: Vec<SubmissionRow>,
}

impl SubmissionTable {
    /// Create a table. Callers guarantee every row has one value per header.
    pub fn new(headers: Vec<String>, rows: Vec<SubmissionRow>) -> Self {
        debug_assert!(rows.iter().all(|r| r.values.len() == headers.len()));
        Self { headers, rows }
    }

    /// Create a table with the canonical header.
    pub fn from_rows(rows: Vec<SubmissionRow>) -> Self {
        Self::new(Column::canonical_headers(), rows)
    }

    /// A table with the same header and a different row subset.
    pub fn with_rows(&self, rows: Vec<SubmissionRow>) -> Self {
        Self::new(self.headers.clone(), rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SubmissionRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubmissionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a SubmissionTable {
    type Item = &'a SubmissionRow;
    type IntoIter = std::slice::Iter<'a, SubmissionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SubmissionRow {
        SubmissionRow::new(
            "The Power Sum",
            "user123",
            "1234567",
            "java15",
            1000.0,
            "Accepted",
            20.0,
            "Yes",
            "Yes",
        )
    }

    #[test]
    fn test_column_headers() {
        assert_eq!(Column::UserId.header(), "Team/User ID");
        assert_eq!(Column::DuringContest.to_string(), "During Contest");
        assert_eq!(Column::canonical_headers().len(), 9);
        assert_eq!(Column::canonical_headers()[0], "Problem");
    }

    #[test]
    fn test_row_values_in_canonical_order() {
        let row = sample_row();
        assert_eq!(
            row.values,
            vec![
                "The Power Sum",
                "user123",
                "1234567",
                "java15",
                "1000",
                "Accepted",
                "20",
                "Yes",
                "Yes"
            ]
        );
    }

    #[test]
    fn test_row_is_accepted() {
        let row = sample_row();
        assert!(row.is_accepted("Accepted"));
        assert!(!row.is_accepted("accepted"));
    }

    #[test]
    fn test_table_with_rows_keeps_headers() {
        let table = SubmissionTable::from_rows(vec![sample_row(), sample_row()]);
        assert_eq!(table.len(), 2);

        let subset = table.with_rows(Vec::new());
        assert!(subset.is_empty());
        assert_eq!(subset.headers(), table.headers());
    }

    #[test]
    fn test_table_iteration() {
        let table = SubmissionTable::from_rows(vec![sample_row()]);
        let problems: Vec<&str> = table.iter().map(|r| r.problem.as_str()).collect();
        assert_eq!(problems, vec!["The Power Sum"]);
        assert_eq!((&table).into_iter().count(), 1);
    }
}
