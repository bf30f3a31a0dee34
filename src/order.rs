//! Ordering of unit-type labels (studio, 1-room, euro-layouts, …).
//!
//! Labels come from many spreadsheets and are only loosely normalised upstream, so the
//! rank lookup falls back from exact matching to a fuzzy containment test. Unknown labels
//! sort after every canonical one.

use std::cmp::Ordering;

/// Canonical unit-type labels; the index is the sort rank.
pub const CANONICAL_UNIT_TYPES: [&str; 12] = [
    "XS (Студия)",
    "1к",
    "S (2Евро)",
    "2к",
    "M (3Евро)",
    "3к",
    "L (4Евро)",
    "4к",
    "5к",
    "6к",
    "7к",
    "8к",
];

/// Rank given to labels that match no canonical unit-type.
pub const UNKNOWN_RANK: usize = 999;

/// A total order over unit-type labels.
pub trait LabelOrder {
    /// Sort rank of a label; lower sorts first.
    fn rank(&self, label: &str) -> usize;

    /// Rank first, then a case-folded comparison of the raw labels, then the raw bytes.
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.rank(a)
            .cmp(&self.rank(b))
            .then_with(|| collate(a, b))
    }
}

/// The fixed order of [`CANONICAL_UNIT_TYPES`] with exact, case-insensitive and
/// containment matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalOrder;

impl LabelOrder for CanonicalOrder {
    fn rank(&self, label: &str) -> usize {
        order_index(label)
    }
}

/// Rank of `label` in the canonical order, or [`UNKNOWN_RANK`].
///
/// Tried in order: exact match, case-insensitive match, then mutual containment
/// after stripping whitespace and parentheses. The containment scan runs from the
/// highest rank down, so "3" lands on "3к" rather than "M (3Евро)".
pub fn order_index(label: &str) -> usize {
    let label = label.trim();

    if let Some(i) = CANONICAL_UNIT_TYPES.iter().position(|c| *c == label) {
        return i;
    }

    let upper = label.to_uppercase();
    if let Some(i) = CANONICAL_UNIT_TYPES
        .iter()
        .position(|c| c.to_uppercase() == upper)
    {
        return i;
    }

    let needle = squash(label);
    if needle.is_empty() {
        return UNKNOWN_RANK;
    }
    containment_scan()
        .find(|(_, canon)| needle.contains(canon.as_str()) || canon.contains(needle.as_str()))
        .map_or(UNKNOWN_RANK, |(i, _)| i)
}

/// Compare two labels by canonical rank, tie-breaking on the raw label.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    CanonicalOrder.compare(a, b)
}

/// Sort labels in place with the given order. Stable, so equal labels keep input order.
pub fn sort_labels<O: LabelOrder + ?Sized, S: AsRef<str>>(order: &O, labels: &mut [S]) {
    labels.sort_by(|a, b| order.compare(a.as_ref(), b.as_ref()));
}

/// Uppercase with whitespace and parentheses removed.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical labels in squashed form, highest rank first.
fn containment_scan() -> impl Iterator<Item = (usize, String)> {
    CANONICAL_UNIT_TYPES
        .iter()
        .enumerate()
        .rev()
        .map(|(i, c)| (i, squash(c)))
}

fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
