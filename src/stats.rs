//! Rollups of group records by property and by unit-type.
//!
//! Two estimators of the mean coexist here. Rows and unit-type TOTAL rows recompute
//! their averages from the concatenated raw sequences of their members. A property's
//! TOTAL row instead takes the count-weighted mean of each member's own `avg_cost`, and
//! only falls back to the raw mean when that weighted value cannot be formed.

use crate::format::percentage;
use crate::models::{GroupRecord, GroupingMode};
use crate::order::{UNKNOWN_RANK, compare_labels, order_index};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Reduced statistics of one bucket. `None` means absent (rendered as a dash).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BucketStats {
    pub count: u64,
    /// Share of the enclosing group's unit count, rounded to a whole percent.
    pub percentage: u32,
    pub total_area: f64,
    pub min_area: Option<f64>,
    pub avg_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_cost: Option<f64>,
    pub avg_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub min_price_per_area: Option<f64>,
    pub avg_price_per_area: Option<f64>,
    pub max_price_per_area: Option<f64>,
}

/// One secondary-key row inside a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupRow {
    /// Unit-type label (property mode) or property name (type mode).
    pub key: String,
    /// Whether the row belongs to the primary property.
    pub is_main: bool,
    pub stats: BucketStats,
}

/// One top-level group with its TOTAL bucket and ordered rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupGroup {
    /// Property name (property mode) or unit-type label (type mode).
    pub key: String,
    /// Primary-property flag; always false for unit-type groups.
    pub is_main: bool,
    pub total: BucketStats,
    pub rows: Vec<RollupRow>,
}

impl RollupGroup {
    pub fn row(&self, key: &str) -> Option<&RollupRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupTree {
    pub mode: GroupingMode,
    pub groups: Vec<RollupGroup>,
}

impl RollupTree {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, key: &str) -> Option<&RollupGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

/// Group `records` by `mode` and reduce every bucket.
///
/// Property mode keeps first-seen property order and sorts unit-types canonically.
/// Type mode sorts unit-types canonically and lists the primary property first, then
/// the others by ascending mean price per area, then by name.
pub fn aggregate(records: &[GroupRecord], mode: GroupingMode) -> RollupTree {
    for r in records {
        if !r.costs.is_empty() && r.costs.len() as u64 != r.count {
            log::debug!(
                "record {}/{}: {} costs for count {}",
                r.source_name(),
                r.unit_type_label(),
                r.costs.len(),
                r.count
            );
        }
    }

    let groups = match mode {
        GroupingMode::Property => by_property(records),
        GroupingMode::Type => by_type(records),
    };
    log::debug!(
        "aggregated {} records into {} groups ({:?})",
        records.len(),
        groups.len(),
        mode
    );
    RollupTree { mode, groups }
}

/// TOTAL bucket of one unit-type across all properties.
///
/// Unlike [`aggregate`], this always yields a bucket: with no matching records it is
/// zero-count with every statistic absent.
pub fn type_total(records: &[GroupRecord], unit_type: &str) -> BucketStats {
    let members: Vec<&GroupRecord> = records
        .iter()
        .filter(|r| r.unit_type_label() == unit_type)
        .collect();
    bucket_total(&members)
}

fn by_property(records: &[GroupRecord]) -> Vec<RollupGroup> {
    partition(records.iter(), GroupRecord::source_name)
        .into_iter()
        .map(|(name, members)| {
            let total = property_total(&members);
            let mut types = partition(members.iter().copied(), GroupRecord::unit_type_label);
            types.sort_by(|(a, _), (b, _)| compare_labels(a, b));
            let rows = types
                .into_iter()
                .map(|(label, bucket)| RollupRow {
                    is_main: bucket.iter().any(|r| r.is_main),
                    stats: row_stats(&bucket, total.count),
                    key: label,
                })
                .collect();
            RollupGroup {
                is_main: members.iter().any(|r| r.is_main),
                key: name,
                total,
                rows,
            }
        })
        .collect()
}

fn by_type(records: &[GroupRecord]) -> Vec<RollupGroup> {
    let mut types = partition(records.iter(), GroupRecord::unit_type_label);
    types.sort_by(|(a, _), (b, _)| compare_labels(a, b));

    types
        .into_iter()
        .map(|(label, members)| {
            if order_index(&label) == UNKNOWN_RANK {
                log::debug!("unit-type {:?} is not canonical; sorted last", label);
            }
            let total = bucket_total(&members);
            let mut props: Vec<(String, Vec<&GroupRecord>, bool, f64)> =
                partition(members.iter().copied(), GroupRecord::source_name)
                    .into_iter()
                    .map(|(name, bucket)| {
                        let is_main = bucket.iter().any(|r| r.is_main);
                        let price = sort_price(&bucket);
                        (name, bucket, is_main, price)
                    })
                    .collect();
            props.sort_by(|a, b| {
                b.2.cmp(&a.2)
                    .then_with(|| a.3.partial_cmp(&b.3).unwrap_or(Ordering::Equal))
                    .then_with(|| a.0.cmp(&b.0))
            });
            let rows = props
                .into_iter()
                .map(|(name, bucket, is_main, _)| RollupRow {
                    key: name,
                    is_main,
                    stats: row_stats(&bucket, total.count),
                })
                .collect();
            RollupGroup {
                key: label,
                is_main: false,
                total,
                rows,
            }
        })
        .collect()
}

/// Split into buckets keyed by `key`, in first-seen order.
fn partition<'a, I, F>(records: I, key: F) -> Vec<(String, Vec<&'a GroupRecord>)>
where
    I: Iterator<Item = &'a GroupRecord>,
    F: Fn(&'a GroupRecord) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<(String, Vec<&'a GroupRecord>)> = Vec::new();
    for r in records {
        let k = key(r);
        match index.get(k) {
            Some(&i) => out[i].1.push(r),
            None => {
                index.insert(k, out.len());
                out.push((k.to_string(), vec![r]));
            }
        }
    }
    out
}

/// Mean price per area used to order properties inside a unit-type.
///
/// Raw values are preferred; a record without them contributes its own average.
fn sort_price(members: &[&GroupRecord]) -> f64 {
    let mut prices: Vec<f64> = Vec::new();
    for r in members {
        if !r.price_per_area.is_empty() {
            prices.extend_from_slice(&r.price_per_area);
        } else if let Some(p) = present(r.avg_price_per_area) {
            prices.push(p);
        }
    }
    mean(prices.iter().copied()).unwrap_or(0.0)
}

fn row_stats(members: &[&GroupRecord], enclosing_count: u64) -> BucketStats {
    let mut stats = reduce(members);
    stats.percentage = percentage(stats.count as f64, enclosing_count as f64);
    stats
}

/// TOTAL row of a group: 100%, or 0% when empty.
fn bucket_total(members: &[&GroupRecord]) -> BucketStats {
    let mut stats = reduce(members);
    stats.percentage = percentage(stats.count as f64, stats.count as f64);
    stats
}

/// TOTAL row of one property, with the count-weighted cost mean.
fn property_total(members: &[&GroupRecord]) -> BucketStats {
    let mut stats = bucket_total(members);
    stats.avg_cost = weighted_avg_cost(members).or(stats.avg_cost);
    stats
}

fn reduce(members: &[&GroupRecord]) -> BucketStats {
    BucketStats {
        count: members.iter().map(|r| r.count).sum(),
        percentage: 0,
        total_area: members.iter().map(|r| r.total_area).sum(),
        min_area: min_present(members.iter().map(|r| r.min_area)),
        avg_area: mean(members.iter().flat_map(|r| r.areas.iter().copied())),
        max_area: max_present(members.iter().map(|r| r.max_area)),
        min_cost: min_present(members.iter().map(|r| r.min_cost)),
        avg_cost: mean(members.iter().flat_map(|r| r.costs.iter().copied())),
        max_cost: max_present(members.iter().map(|r| r.max_cost)),
        min_price_per_area: min_present(members.iter().map(|r| r.min_price_per_area)),
        avg_price_per_area: mean(members.iter().flat_map(|r| r.price_per_area.iter().copied())),
        max_price_per_area: max_present(members.iter().map(|r| r.max_price_per_area)),
    }
}

/// Σ(avg_cost · count) / Σcount over members with a count and an average.
///
/// `None` when the total weight or the weighted value is zero; the caller then keeps
/// the raw-concatenated mean.
fn weighted_avg_cost(members: &[&GroupRecord]) -> Option<f64> {
    let (sum, weight) = members
        .iter()
        .filter(|r| r.count > 0)
        .filter_map(|r| present(r.avg_cost).map(|c| (c, r.count as f64)))
        .fold((0.0, 0.0), |(s, w), (c, n)| (s + c * n, w + n));
    if weight > 0.0 {
        Some(sum / weight).filter(|v| *v > 0.0)
    } else {
        None
    }
}

/// Zero, negative and non-finite statistics are "absent".
fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

fn min_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.filter_map(present).reduce(f64::min)
}

fn max_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.filter_map(present).reduce(f64::max)
}

/// Arithmetic mean; absent for an empty sequence or a zero result.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return None;
    }
    present(Some(sum / n as f64))
}
