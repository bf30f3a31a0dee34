//! Flattening a rollup tree into display rows of cells.
//!
//! Each cell keeps its numeric value next to the rendered string so the presentation
//! layer never re-parses text. In the by-type report every numeric column also carries
//! an intensity scaled within its own unit-type.

use crate::config::ReportConfig;
use crate::format::{format_area, format_millions, format_price};
use crate::intensity::normalize;
use crate::models::{GroupRecord, GroupingMode};
use crate::stats::{BucketStats, RollupTree, aggregate};
use serde::{Deserialize, Serialize};

/// Label of the grand-total row of each group.
pub const TOTAL_LABEL: &str = "ВСЕГО";

/// Numeric columns of the rollup table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    TotalArea,
    MinArea,
    MinCost,
    AvgArea,
    AvgCost,
    MaxArea,
    MaxCost,
    MinPricePerArea,
    AvgPricePerArea,
    MaxPricePerArea,
}

pub const COLUMNS: [Column; 10] = [
    Column::TotalArea,
    Column::MinArea,
    Column::MinCost,
    Column::AvgArea,
    Column::AvgCost,
    Column::MaxArea,
    Column::MaxCost,
    Column::MinPricePerArea,
    Column::AvgPricePerArea,
    Column::MaxPricePerArea,
];

impl Column {
    /// Stable machine name, used as the CSV header.
    pub fn key(self) -> &'static str {
        match self {
            Column::TotalArea => "total_area",
            Column::MinArea => "min_area",
            Column::MinCost => "min_cost_mln",
            Column::AvgArea => "avg_area",
            Column::AvgCost => "avg_cost_mln",
            Column::MaxArea => "max_area",
            Column::MaxCost => "max_cost_mln",
            Column::MinPricePerArea => "min_price_per_area",
            Column::AvgPricePerArea => "avg_price_per_area",
            Column::MaxPricePerArea => "max_price_per_area",
        }
    }

    pub fn value(self, s: &BucketStats) -> Option<f64> {
        match self {
            Column::TotalArea => Some(s.total_area),
            Column::MinArea => s.min_area,
            Column::MinCost => s.min_cost,
            Column::AvgArea => s.avg_area,
            Column::AvgCost => s.avg_cost,
            Column::MaxArea => s.max_area,
            Column::MaxCost => s.max_cost,
            Column::MinPricePerArea => s.min_price_per_area,
            Column::AvgPricePerArea => s.avg_price_per_area,
            Column::MaxPricePerArea => s.max_price_per_area,
        }
    }

    fn render(self, v: Option<f64>, locale: &str) -> String {
        match self {
            // total area is a sum, shown even when zero
            Column::TotalArea => format!("{:.2}", v.unwrap_or(0.0)),
            Column::MinArea | Column::AvgArea | Column::MaxArea => format_area(v),
            Column::MinCost | Column::AvgCost | Column::MaxCost => format_millions(v),
            Column::MinPricePerArea | Column::AvgPricePerArea | Column::MaxPricePerArea => {
                format_price(v, locale)
            }
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub value: Option<f64>,
    pub display: String,
    /// Position in [0, 1] within the cell's bucket; `None` means no colour.
    pub intensity: Option<f64>,
}

/// One rendered row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    /// Top-level key the row belongs to.
    pub group: String,
    /// Secondary key, or [`TOTAL_LABEL`].
    pub label: String,
    pub is_main: bool,
    pub is_total: bool,
    pub count: u64,
    pub percentage: String,
    /// Values in [`COLUMNS`] order.
    pub cells: Vec<Cell>,
}

impl ReportRow {
    pub fn cell(&self, column: Column) -> Option<&Cell> {
        COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.cells.get(i))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub mode: GroupingMode,
    pub rows: Vec<ReportRow>,
}

/// Aggregate and render `records` in one pass.
pub fn report_for(records: &[GroupRecord], config: &ReportConfig) -> Report {
    build_report(&aggregate(records, config.mode), &config.locale)
}

/// Render a rollup tree.
///
/// Property mode puts each group's TOTAL row first, type mode puts it last. Only the
/// type-mode report is colour-coded, one scale per (unit-type, column), TOTAL rows excluded.
pub fn build_report(tree: &RollupTree, locale: &str) -> Report {
    let mut rows = Vec::new();

    for group in &tree.groups {
        let total = render_row(&group.key, TOTAL_LABEL, group.is_main, true, &group.total, locale);

        let mut body: Vec<ReportRow> = group
            .rows
            .iter()
            .map(|r| render_row(&group.key, &r.key, r.is_main, false, &r.stats, locale))
            .collect();

        if tree.mode == GroupingMode::Type {
            apply_intensity(&mut body);
        }

        match tree.mode {
            GroupingMode::Property => {
                rows.push(total);
                rows.extend(body);
            }
            GroupingMode::Type => {
                rows.extend(body);
                rows.push(total);
            }
        }
    }

    Report {
        mode: tree.mode,
        rows,
    }
}

fn render_row(
    group: &str,
    label: &str,
    is_main: bool,
    is_total: bool,
    stats: &BucketStats,
    locale: &str,
) -> ReportRow {
    let cells = COLUMNS
        .iter()
        .map(|col| {
            let value = col.value(stats);
            Cell {
                display: col.render(value, locale),
                value,
                intensity: None,
            }
        })
        .collect();
    ReportRow {
        group: group.to_string(),
        label: label.to_string(),
        is_main,
        is_total,
        count: stats.count,
        percentage: format!("{}%", stats.percentage),
        cells,
    }
}

/// Scale each column of one group's body rows on its own.
fn apply_intensity(body: &mut [ReportRow]) {
    for i in 0..COLUMNS.len() {
        let values: Vec<Option<f64>> = body
            .iter()
            .map(|r| r.cells.get(i).and_then(|c| c.value))
            .collect();
        for (row, intensity) in body.iter_mut().zip(normalize(&values)) {
            if let Some(cell) = row.cells.get_mut(i) {
                cell.intensity = intensity;
            }
        }
    }
}

