use aptmix::GroupRecord;
use aptmix::compare::{DescriptiveStats, comparable_pairs, compare_pairs, has_comparable_groups};

fn rec(source: &str, unit_type: &str, is_main: bool, costs: &[f64]) -> GroupRecord {
    GroupRecord {
        source: source.into(),
        unit_type: unit_type.into(),
        is_main,
        count: costs.len() as u64,
        costs: costs.to_vec(),
        ..Default::default()
    }
}

#[test]
fn detects_same_type_across_properties() {
    let recs = vec![
        rec("Main", "1-room", true, &[6e6]),
        rec("Comp", "1-room", false, &[5e6]),
    ];
    assert!(has_comparable_groups(&recs));
    assert!(!has_comparable_groups(&recs[..1]));
    assert!(!has_comparable_groups(&[]));
}

#[test]
fn same_property_or_different_type_is_not_comparable() {
    let recs = vec![
        rec("Main", "1к", true, &[1.0]),
        rec("Main", "1к", true, &[2.0]),
        rec("Comp", "2к", false, &[3.0]),
    ];
    assert!(!has_comparable_groups(&recs));
    assert!(comparable_pairs(&recs).is_empty());
}

#[test]
fn pairs_are_oriented_main_first() {
    let recs = vec![
        rec("Comp", "1к", false, &[1.0]),
        rec("Main", "1к", true, &[2.0]),
        rec("Other", "1к", false, &[3.0]),
    ];
    let pairs = comparable_pairs(&recs);
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].main.source, "Main");
    assert_eq!(pairs[0].competitor.source, "Comp");
    // neither is primary: input order is kept
    assert_eq!(pairs[1].main.source, "Comp");
    assert_eq!(pairs[1].competitor.source, "Other");
    assert_eq!(pairs[2].main.source, "Main");
    assert_eq!(pairs[2].unit_type, "1к");
}

#[test]
fn comparison_reports_relative_differences() {
    let recs = vec![
        rec("Main", "1к", true, &[110.0, 110.0]),
        rec("Comp", "1к", false, &[100.0, 100.0]),
        rec("Bare", "1к", false, &[]),
    ];
    let got = compare_pairs(&recs);
    assert_eq!(got.len(), 1, "pairs without raw costs are skipped");
    let c = &got[0];
    assert_eq!(c.main_source, "Main");
    assert_eq!(c.competitor_source, "Comp");
    assert!((c.percentage_diffs.mean.unwrap() - 10.0).abs() < 1e-9);
    assert!((c.percentage_diffs.median.unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(c.main.std, 0.0);
}

#[test]
fn descriptive_stats_flag_outliers() {
    let s = DescriptiveStats::from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 100.0]).unwrap();
    assert_eq!(s.count, 7);
    assert_eq!(s.median, 13.0);
    assert_eq!(s.q1, 11.0);
    assert_eq!(s.q3, 15.0);
    assert_eq!(s.outliers_upper, vec![100.0]);
    assert!(s.outliers_lower.is_empty());
    assert_eq!(s.outliers_count(), 1);
    assert!(DescriptiveStats::from_values(&[]).is_none());
}
