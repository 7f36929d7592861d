//! Score histogram.

use crate::models::{ScoreHistogramBucket, SubmissionTable};

/// Partition `[min, max]` of the score column into `bins` equal-width
/// buckets and count rows per bucket. Buckets are closed on the left; the
/// last one is also closed on the right. When every score is equal a single
/// bucket holds all rows.
pub fn score_histogram(table: &SubmissionTable, bins: usize) -> Vec<ScoreHistogramBucket> {
    if table.is_empty() {
        return Vec::new();
    }

    let bins = bins.max(1);
    let (min, max) = table.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.score), hi.max(r.score))
    });

    if min == max {
        return vec![ScoreHistogramBucket {
            lower: min,
            upper: max,
            count: table.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut buckets: Vec<ScoreHistogramBucket> = (0..bins)
        .map(|i| ScoreHistogramBucket {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for row in table {
        let slot = (((row.score - min) / width).floor() as usize).min(bins - 1);
        buckets[slot].count += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::{row, table};

    fn scores(values: &[f64]) -> SubmissionTable {
        table(values.iter().map(|&s| row("A", "u1", "Accepted", s)).collect())
    }

    #[test]
    fn test_histogram_equal_width() {
        let t = scores(&[0.0, 5.0, 10.0, 15.0, 20.0]);
        let hist = score_histogram(&t, 4);

        assert_eq!(hist.len(), 4);
        assert_eq!(hist[0].lower, 0.0);
        assert_eq!(hist[0].upper, 5.0);
        assert_eq!(hist[3].upper, 20.0);
        let counts: Vec<usize> = hist.iter().map(|b| b.count).collect();
        // max lands in the last bucket
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_counts_every_row() {
        let t = scores(&[0.0, 0.0, 3.0, 7.5, 20.0, 20.0, 11.0]);
        let hist = score_histogram(&t, 20);

        assert_eq!(hist.len(), 20);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), t.len());
    }

    #[test]
    fn test_histogram_single_value() {
        let t = scores(&[20.0, 20.0, 20.0]);
        let hist = score_histogram(&t, 20);

        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].count, 3);
        assert_eq!(hist[0].lower, 20.0);
    }

    #[test]
    fn test_histogram_zero_bins_treated_as_one() {
        let t = scores(&[1.0, 2.0]);
        let hist = score_histogram(&t, 0);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].count, 2);
    }

    #[test]
    fn test_histogram_empty_table() {
        assert!(score_histogram(&table(Vec::new()), 20).is_empty());
    }
}
