use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// RawTable – the wide CSV exactly as read from disk
// ---------------------------------------------------------------------------

/// A raw delimited table: header row plus string cells, no typing applied.
/// The World Bank GDP export is wide format – one column per year label.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// GDP time series – the normalized long form
// ---------------------------------------------------------------------------

/// One observation of the GDP series.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRow {
    /// January 1 of the observation year (monthly for the fallback series).
    pub date: NaiveDate,
    /// Raw passthrough value – no sign or range enforcement.
    pub gdp: f64,
}

/// The normalized GDP table, sorted ascending by date. Produced once per
/// cache lifetime and read-only from that point; filters derive fresh views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GdpSeries {
    pub rows: Vec<GdpRow>,
}

impl GdpSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last observation year, if any rows exist.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some((first.date.year(), last.date.year()))
    }
}

/// A filtered slice of the GDP series, optionally carrying a smoothed
/// column. The smoothed values are attached to the view only – the cached
/// series is never touched.
#[derive(Debug, Clone, Default)]
pub struct GdpView {
    pub rows: Vec<GdpRow>,
    /// Trailing moving average of `gdp`, same length as `rows` when present.
    pub smoothed: Option<Vec<f64>>,
}

impl GdpView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LoadOutcome – real data vs. synthetic fallback
// ---------------------------------------------------------------------------

/// Result of a GDP load. The loader never fails outright: when the source
/// file cannot be used it substitutes a synthetic series, and the tag lets
/// callers tell the two apart without string-matching error messages.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The configured file parsed and normalized successfully.
    Loaded(GdpSeries),
    /// The source was unusable; `series` is synthetic placeholder data.
    Fallback { series: GdpSeries, reason: String },
}

impl LoadOutcome {
    pub fn series(&self) -> &GdpSeries {
        match self {
            LoadOutcome::Loaded(series) => series,
            LoadOutcome::Fallback { series, .. } => series,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Disaster records – the fixed school-disruption table
// ---------------------------------------------------------------------------

/// One school-disruption count tied to a named weather disaster.
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterRecord {
    /// Disaster label, e.g. "태풍 카눈".
    pub event: String,
    pub year: i32,
    /// Affected region, "전국" for nationwide figures.
    pub region: String,
    /// Action or impact type ("휴업", "원격수업", ...).
    pub group: String,
    /// Non-negative count of affected schools/sites.
    pub value: u32,
    /// Count unit label ("곳").
    pub unit: String,
    /// January 1 of `year`, for a uniform date axis with the GDP table.
    pub date: NaiveDate,
}

/// The complete hand-authored disruption dataset (13 rows, 3 events).
#[derive(Debug, Clone, Default)]
pub struct DisasterTable {
    pub records: Vec<DisasterRecord>,
}

impl DisasterTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique event labels in first-seen order.
    pub fn events(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.event.as_str()))
    }

    /// Unique action/impact labels in first-seen order.
    pub fn groups(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.group.as_str()))
    }

    pub fn total_value(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.value)).sum()
    }
}

fn unique_in_order<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Shared date helper
// ---------------------------------------------------------------------------

/// January 1 of the given year. Falls back to the epoch for years chrono
/// cannot represent, which none of our fixed inputs hit.
pub fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_span_covers_first_and_last_row() {
        let series = GdpSeries {
            rows: vec![
                GdpRow { date: year_start(1960), gdp: 1.0 },
                GdpRow { date: year_start(1995), gdp: 2.0 },
                GdpRow { date: year_start(2022), gdp: 3.0 },
            ],
        };
        assert_eq!(series.year_span(), Some((1960, 2022)));
        assert_eq!(GdpSeries::default().year_span(), None);
    }

    #[test]
    fn load_outcome_exposes_tag_and_series() {
        let series = GdpSeries {
            rows: vec![GdpRow { date: year_start(2000), gdp: 1.0 }],
        };
        let loaded = LoadOutcome::Loaded(series.clone());
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.fallback_reason(), None);

        let fallback = LoadOutcome::Fallback {
            series,
            reason: "missing file".into(),
        };
        assert!(fallback.is_fallback());
        assert_eq!(fallback.fallback_reason(), Some("missing file"));
        assert_eq!(fallback.series().len(), 1);
    }

    #[test]
    fn unique_labels_keep_first_seen_order() {
        let table = DisasterTable {
            records: vec![
                record("전국 폭우", "휴업"),
                record("태풍 카눈", "휴업"),
                record("전국 폭우", "원격수업"),
            ],
        };
        assert_eq!(table.events(), vec!["전국 폭우", "태풍 카눈"]);
        assert_eq!(table.groups(), vec!["휴업", "원격수업"]);
    }

    fn record(event: &str, group: &str) -> DisasterRecord {
        DisasterRecord {
            event: event.to_string(),
            year: 2023,
            region: "전국".to_string(),
            group: group.to_string(),
            value: 1,
            unit: "곳".to_string(),
            date: year_start(2023),
        }
    }
}
