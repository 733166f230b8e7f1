use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use super::model::{DisasterRecord, DisasterTable, GdpSeries, GdpView};

// ---------------------------------------------------------------------------
// GDP: inclusive year-range filter + optional smoothing
// ---------------------------------------------------------------------------

/// Trailing moving-average window, in periods.
pub const SMOOTHING_WINDOW: usize = 3;

/// Derive a view of `series` restricted to years in `[min_year, max_year]`
/// inclusive. When `smoothing` is set, a trailing 3-period moving average
/// of the value column is attached to the view; the source series is left
/// untouched.
pub fn gdp_view(series: &GdpSeries, min_year: i32, max_year: i32, smoothing: bool) -> GdpView {
    let rows: Vec<_> = series
        .rows
        .iter()
        .filter(|r| {
            let year = r.date.year();
            year >= min_year && year <= max_year
        })
        .cloned()
        .collect();

    let smoothed = smoothing.then(|| {
        let values: Vec<f64> = rows.iter().map(|r| r.gdp).collect();
        rolling_mean(&values, SMOOTHING_WINDOW)
    });

    GdpView { rows, smoothed }
}

/// Trailing simple moving average with an expanding window at the start:
/// element `i` is the mean of the last `window` values up to and including
/// `i`, using however many exist when fewer are available.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let lo = (i + 1).saturating_sub(window);
            let slice = &values[lo..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Disasters: categorical event filter + region aggregation
// ---------------------------------------------------------------------------

/// Keep records whose `event` is in `selected`. An empty selection means
/// nothing is selected, so it yields zero rows rather than all of them.
pub fn filter_events(table: &DisasterTable, selected: &BTreeSet<String>) -> Vec<DisasterRecord> {
    table
        .records
        .iter()
        .filter(|r| selected.contains(&r.event))
        .cloned()
        .collect()
}

/// Sum of `value` per region, skipping `exclude_region` (the nationwide
/// label would otherwise dwarf every real region). Sorted by region label.
pub fn region_totals(records: &[DisasterRecord], exclude_region: &str) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for r in records {
        if r.region != exclude_region {
            *totals.entry(r.region.clone()).or_default() += u64::from(r.value);
        }
    }
    totals.into_iter().collect()
}
