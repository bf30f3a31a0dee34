use aptmix::intensity::{normalize, normalize_values};
use aptmix::report::{Column, build_report};
use aptmix::stats::aggregate;
use aptmix::{GroupRecord, GroupingMode};

#[test]
fn bucket_scale_ignores_other_buckets() {
    let a = vec![Some(10.0), Some(30.0), Some(20.0)];
    let before = normalize(&a);
    let _ = normalize(&[Some(1.0), Some(1_000_000.0)]);
    let _ = normalize(&[Some(5.0), Some(6.0)]);
    assert_eq!(normalize(&a), before);
    assert_eq!(before, vec![Some(0.0), Some(1.0), Some(0.5)]);
}

#[test]
fn degenerate_buckets_have_no_colour() {
    assert_eq!(normalize(&[Some(42.0)]), vec![None]);
    assert_eq!(normalize(&[Some(7.0), Some(7.0), None]), vec![None, None, None]);
    assert_eq!(normalize_values(&[0.0, 0.0]), vec![None, None]);
    for v in normalize(&[Some(f64::NAN), Some(3.0)]) {
        assert!(v.is_none());
    }
}

#[test]
fn absent_slots_stay_uncoloured() {
    let got = normalize_values(&[0.0, 100.0, 200.0]);
    assert_eq!(got, vec![None, Some(0.0), Some(1.0)]);
}

fn rec(source: &str, unit_type: &str, area: f64) -> GroupRecord {
    GroupRecord {
        source: source.into(),
        unit_type: unit_type.into(),
        count: 1,
        total_area: area,
        ..Default::default()
    }
}

#[test]
fn by_type_report_scales_each_unit_type_alone() {
    let recs = vec![
        rec("A", "1к", 30.0),
        rec("B", "1к", 40.0),
        rec("A", "3к", 90.0),
        rec("B", "3к", 100.0),
    ];
    let report = build_report(&aggregate(&recs, GroupingMode::Type), "en");

    let intensity = |group: &str, label: &str| {
        report
            .rows
            .iter()
            .find(|r| r.group == group && r.label == label)
            .and_then(|r| r.cell(Column::TotalArea))
            .and_then(|c| c.intensity)
    };
    assert_eq!(intensity("1к", "A"), Some(0.0));
    assert_eq!(intensity("1к", "B"), Some(1.0));
    assert_eq!(intensity("3к", "A"), Some(0.0));
    assert_eq!(intensity("3к", "B"), Some(1.0));

    // totals are never coloured
    for r in report.rows.iter().filter(|r| r.is_total) {
        assert!(r.cells.iter().all(|c| c.intensity.is_none()));
    }
}

#[test]
fn by_property_report_is_not_coloured() {
    let recs = vec![rec("A", "1к", 30.0), rec("A", "3к", 90.0)];
    let report = build_report(&aggregate(&recs, GroupingMode::Property), "en");
    assert!(
        report
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .all(|c| c.intensity.is_none())
    );
}
