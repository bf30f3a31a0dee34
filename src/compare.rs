//! Head-to-head comparison of records sharing a unit-type across properties.

use crate::models::GroupRecord;
use serde::{Deserialize, Serialize};

/// True iff two records share a unit-type but come from different properties.
///
/// This gates whether a comparison view is offered at all.
pub fn has_comparable_groups(records: &[GroupRecord]) -> bool {
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if comparable(a, b) {
                return true;
            }
        }
    }
    false
}

/// Two records of the same unit-type from different properties, oriented main-first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparablePair<'a> {
    pub unit_type: &'a str,
    /// The primary property's record, or the earlier record when neither is primary.
    pub main: &'a GroupRecord,
    pub competitor: &'a GroupRecord,
}

/// Every comparable pair (i < j) in input order.
pub fn comparable_pairs(records: &[GroupRecord]) -> Vec<ComparablePair<'_>> {
    let mut out = Vec::new();
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if !comparable(a, b) {
                continue;
            }
            let (main, competitor) = if b.is_main && !a.is_main { (b, a) } else { (a, b) };
            out.push(ComparablePair {
                unit_type: &a.unit_type,
                main,
                competitor,
            });
        }
    }
    out
}

fn comparable(a: &GroupRecord, b: &GroupRecord) -> bool {
    a.unit_type == b.unit_type && a.source != b.source
}

/// Descriptive statistics of one side of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub outliers_lower: Vec<f64>,
    pub outliers_upper: Vec<f64>,
}

impl DescriptiveStats {
    /// Stats over finite values; `None` when there are none.
    ///
    /// Quartiles use the exclusive method (positions `k·(n+1)/4`, clamped to the data);
    /// outliers lie beyond 1.5·IQR from the quartiles.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
        if v.is_empty() {
            return None;
        }
        v.sort_by(f64::total_cmp);

        let n = v.len();
        let mean = v.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            v[n / 2]
        } else {
            (v[n / 2 - 1] + v[n / 2]) / 2.0
        };
        let std = if n > 1 {
            let ss: f64 = v.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let q1 = exclusive_quartile(&v, 1);
        let q3 = exclusive_quartile(&v, 3);
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;

        Some(Self {
            count: n,
            mean,
            median,
            std,
            min: v[0],
            max: v[n - 1],
            q1,
            q3,
            iqr,
            outliers_lower: v.iter().copied().filter(|x| *x < lower).collect(),
            outliers_upper: v.iter().copied().filter(|x| *x > upper).collect(),
        })
    }

    pub fn outliers_count(&self) -> usize {
        self.outliers_lower.len() + self.outliers_upper.len()
    }
}

/// k-th quartile of sorted data by the exclusive method.
fn exclusive_quartile(sorted: &[f64], k: usize) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let m = n + 1;
    let j = (k * m / 4).clamp(1, n - 1);
    let delta = (k * m) as f64 - (j * 4) as f64;
    (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0
}

/// Relative difference of the main value against the competitor, in percent.
///
/// `None` when the competitor value is zero.
pub fn percentage_diff(main: f64, competitor: f64) -> Option<f64> {
    if competitor == 0.0 {
        return None;
    }
    Some((main - competitor) / competitor * 100.0)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PercentageDiffs {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A comparison of one comparable pair over raw per-unit costs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    pub unit_type: String,
    pub main_source: String,
    pub competitor_source: String,
    pub main: DescriptiveStats,
    pub competitor: DescriptiveStats,
    pub percentage_diffs: PercentageDiffs,
}

/// Cost comparisons for every comparable pair; pairs missing raw costs are skipped.
pub fn compare_pairs(records: &[GroupRecord]) -> Vec<Comparison> {
    comparable_pairs(records)
        .into_iter()
        .filter_map(|pair| {
            let main = DescriptiveStats::from_values(&pair.main.costs);
            let competitor = DescriptiveStats::from_values(&pair.competitor.costs);
            let (Some(main), Some(competitor)) = (main, competitor) else {
                log::debug!(
                    "skipping {} vs {} for {:?}: no raw costs",
                    pair.main.source_name(),
                    pair.competitor.source_name(),
                    pair.unit_type
                );
                return None;
            };
            let percentage_diffs = PercentageDiffs {
                mean: percentage_diff(main.mean, competitor.mean),
                median: percentage_diff(main.median, competitor.median),
                min: percentage_diff(main.min, competitor.min),
                max: percentage_diff(main.max, competitor.max),
            };
            Some(Comparison {
                unit_type: pair.unit_type.to_string(),
                main_source: pair.main.source_name().to_string(),
                competitor_source: pair.competitor.source_name().to_string(),
                main,
                competitor,
                percentage_diffs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_match_exclusive_method() {
        // n = 7: positions 2 and 6 exactly.
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert_eq!(exclusive_quartile(&v, 1), 2.0);
        assert_eq!(exclusive_quartile(&v, 3), 6.0);
        // n = 4: m = 5, q1 at 1.25 -> 1.25, q3 at 3.75 -> 3.75
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((exclusive_quartile(&v, 1) - 1.25).abs() < 1e-12);
        assert!((exclusive_quartile(&v, 3) - 3.75).abs() < 1e-12);
    }

    #[test]
    fn diff_against_zero_is_none() {
        assert_eq!(percentage_diff(5.0, 0.0), None);
        let d = percentage_diff(110.0, 100.0).unwrap();
        assert!((d - 10.0).abs() < 1e-9);
    }
}
