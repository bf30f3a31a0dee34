use aptmix::order::{
    CANONICAL_UNIT_TYPES, CanonicalOrder, LabelOrder, UNKNOWN_RANK, compare_labels, order_index,
    sort_labels,
};
use std::cmp::Ordering;

#[test]
fn fuzzy_euro_label_matches_canonical_rank() {
    let canonical = order_index("S (2Евро)");
    assert_eq!(canonical, 2);
    assert_eq!(order_index("2 Евро"), canonical);
    assert_eq!(order_index("s(2евро)"), canonical);
    assert_eq!(order_index("  S (2Евро)  "), canonical);
}

#[test]
fn bare_letters_and_digits_prefer_higher_ranks() {
    assert_eq!(order_index("S"), 2);
    assert_eq!(order_index("M"), 4);
    assert_eq!(order_index("L"), 6);
    assert_eq!(order_index("3"), 5);
    assert_eq!(order_index("4"), 7);
    assert_eq!(order_index("2"), 3);
}

#[test]
fn case_insensitive_and_partial_studio_labels() {
    assert_eq!(order_index("xs (студия)"), 0);
    assert_eq!(order_index("Студия"), 0);
}

#[test]
fn unknown_labels_sort_after_canonical_ones() {
    assert_eq!(order_index("Пентхаус"), UNKNOWN_RANK);
    assert_eq!(order_index(""), UNKNOWN_RANK);
    assert_eq!(order_index("()"), UNKNOWN_RANK);
    assert_eq!(compare_labels("Пентхаус", "8к"), Ordering::Greater);
    assert_eq!(compare_labels("1к", "XS (Студия)"), Ordering::Greater);
}

#[test]
fn unknown_labels_tie_break_by_name() {
    assert_eq!(compare_labels("Апартаменты", "Пентхаус"), Ordering::Less);
    assert_eq!(compare_labels("Пентхаус", "Пентхаус"), Ordering::Equal);
}

#[test]
fn sorting_is_idempotent() {
    let mut labels = vec![
        "3к", "Пентхаус", "S (2Евро)", "1к", "XS (Студия)", "Апартаменты", "2 евро", "M (3Евро)",
        "8к",
    ];
    sort_labels(&CanonicalOrder, &mut labels);
    let once = labels.clone();
    sort_labels(&CanonicalOrder, &mut labels);
    assert_eq!(labels, once);

    assert_eq!(labels[0], "XS (Студия)");
    assert_eq!(labels[1], "1к");
    // both euro-two spellings share rank 2 and fall back to the case-folded name
    assert_eq!(labels[2], "2 евро");
    assert_eq!(labels[3], "S (2Евро)");
    assert_eq!(&labels[labels.len() - 2..], &["Апартаменты", "Пентхаус"]);
}

#[test]
fn canonical_list_is_already_sorted() {
    let mut labels: Vec<String> = CANONICAL_UNIT_TYPES.iter().rev().map(|s| s.to_string()).collect();
    sort_labels(&CanonicalOrder, &mut labels);
    let expected: Vec<String> = CANONICAL_UNIT_TYPES.iter().map(|s| s.to_string()).collect();
    assert_eq!(labels, expected);
}

struct Alphabetical;

impl LabelOrder for Alphabetical {
    fn rank(&self, _label: &str) -> usize {
        0
    }
}

#[test]
fn custom_order_falls_back_to_collation() {
    let mut labels = vec!["b", "A", "a"];
    sort_labels(&Alphabetical, &mut labels);
    assert_eq!(labels, vec!["A", "a", "b"]);
}
