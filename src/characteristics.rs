//! Side-by-side summary of properties: descriptive attributes plus the apartment mix.
//!
//! Descriptive rows come from the upload service; unit counts and prices are computed
//! here from the group records and joined by property name. Colour intensities are
//! scaled per property: one scale for the unit counts, one for the price figures.

use crate::format::{format_integer_locale, percentage};
use crate::intensity::normalize;
use crate::models::{CharacteristicsRow, GroupRecord};
use crate::order::CANONICAL_UNIT_TYPES;
use crate::report::Cell;
use crate::stats::mean;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One property column of the summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySummary {
    pub name: String,
    pub is_main: bool,
    pub attributes: CharacteristicsRow,
    pub total_units: u64,
    /// Per canonical unit-type: count with its share, e.g. `"12 (30%)"`.
    pub counts: Vec<Cell>,
    /// Mean of per-unit cost/area over every unit of the property.
    pub avg_price_per_area: Cell,
    /// Per canonical unit-type: mean absolute cost.
    pub avg_costs: Vec<Cell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacteristicsSummary {
    /// Row labels for `counts` and `avg_costs`.
    pub unit_types: Vec<String>,
    pub properties: Vec<PropertySummary>,
}

#[derive(Debug, Default)]
struct TypeTally {
    count: u64,
    costs: Vec<f64>,
}

#[derive(Debug, Default)]
struct PropertyTally {
    total: u64,
    per_area: Vec<f64>,
    by_type: HashMap<String, TypeTally>,
}

/// Build the summary for the properties listed in `rows`, in their order.
///
/// Per-unit price per area is cost/area over the overlapping prefix of each record's
/// `costs` and `areas`; units with no positive area are skipped.
pub fn summarize(
    rows: &[CharacteristicsRow],
    records: &[GroupRecord],
    locale: &str,
) -> CharacteristicsSummary {
    let tallies = tally(records);
    let empty = PropertyTally::default();

    let properties = rows
        .iter()
        .map(|row| {
            let t = tallies.get(row.name.as_str()).unwrap_or(&empty);
            summarize_one(row, t, locale)
        })
        .collect();

    CharacteristicsSummary {
        unit_types: CANONICAL_UNIT_TYPES.iter().map(|s| s.to_string()).collect(),
        properties,
    }
}

fn tally(records: &[GroupRecord]) -> HashMap<&str, PropertyTally> {
    let mut out: HashMap<&str, PropertyTally> = HashMap::new();
    for r in records {
        let stat = out.entry(r.source_name()).or_default();
        stat.total += r.count;

        let by_type = stat
            .by_type
            .entry(r.unit_type_label().to_string())
            .or_default();
        by_type.count += r.count;
        by_type.costs.extend_from_slice(&r.costs);

        if r.costs.len() != r.areas.len() && !r.costs.is_empty() {
            log::debug!(
                "{}/{}: {} costs vs {} areas, using the common prefix",
                r.source_name(),
                r.unit_type_label(),
                r.costs.len(),
                r.areas.len()
            );
        }
        for (cost, area) in r.costs.iter().zip(&r.areas) {
            if *area > 0.0 {
                stat.per_area.push(cost / area);
            }
        }
    }
    out
}

fn summarize_one(row: &CharacteristicsRow, t: &PropertyTally, locale: &str) -> PropertySummary {
    let type_of = |label: &str| t.by_type.get(label);

    let count_values: Vec<Option<f64>> = CANONICAL_UNIT_TYPES
        .iter()
        .map(|label| {
            type_of(*label)
                .map(|tt| tt.count)
                .filter(|c| *c > 0 && t.total > 0)
                .map(|c| c as f64)
        })
        .collect();
    let count_intensity = normalize(&count_values);
    let counts = count_values
        .iter()
        .zip(count_intensity)
        .map(|(v, intensity)| Cell {
            value: *v,
            display: v
                .map(|c| format!("{} ({}%)", c, percentage(c, t.total as f64)))
                .unwrap_or_default(),
            intensity,
        })
        .collect();

    // the property-wide price per area shares one scale with the per-type costs
    let mut price_values: Vec<Option<f64>> = vec![mean(t.per_area.iter().copied())];
    price_values.extend(
        CANONICAL_UNIT_TYPES
            .iter()
            .map(|label| type_of(*label).and_then(|tt| mean(tt.costs.iter().copied()))),
    );
    let mut price_cells: Vec<Cell> = price_values
        .iter()
        .zip(normalize(&price_values))
        .map(|(v, intensity)| Cell {
            value: *v,
            display: v
                .map(|x| format_integer_locale(x, locale))
                .unwrap_or_default(),
            intensity,
        })
        .collect();
    let avg_costs = price_cells.split_off(1);
    let avg_price_per_area = price_cells.remove(0);

    PropertySummary {
        name: row.name.clone(),
        is_main: row.is_main,
        attributes: row.clone(),
        total_units: t.total,
        counts,
        avg_price_per_area,
        avg_costs,
    }
}
