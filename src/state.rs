use std::collections::BTreeSet;

use crate::config::DashboardConfig;
use crate::data::cache::GdpCache;
use crate::data::filter;
use crate::data::model::{DisasterRecord, GdpView};
use crate::data::{disaster, export};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dashboard tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// GDP time series from the configured CSV.
    Gdp,
    /// Fixed school-disruption statistics.
    Disasters,
}

/// The full UI state, independent of rendering. Every interaction re-derives
/// its views synchronously from the cached tables; nothing here is mutated
/// behind the UI's back.
pub struct AppState {
    pub config: DashboardConfig,
    pub cache: GdpCache,
    pub tab: Tab,

    /// Selected year range, inclusive. `None` until the first frame with
    /// data; always clamped to the data-driven span before use.
    pub year_range: Option<(i32, i32)>,

    /// Whether to overlay the 3-period moving average on the GDP view.
    pub smoothing: bool,

    /// Disaster events currently selected. Starts with everything selected;
    /// an empty set hides every row.
    pub selected_events: BTreeSet<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = GdpCache::new(config.cache_ttl());
        let selected_events = disaster::dataset().events().into_iter().collect();
        Self {
            config,
            cache,
            tab: Tab::Gdp,
            year_range: None,
            smoothing: false,
            selected_events,
            status_message: None,
        }
    }

    // -- GDP tab ----------------------------------------------------------

    /// Whether the current GDP table is synthetic, and why.
    pub fn fallback_reason(&mut self) -> Option<String> {
        self.cache
            .get(&self.config.data_path, &self.config.country)
            .fallback_reason()
            .map(str::to_string)
    }

    /// First and last year of the loaded series.
    pub fn gdp_year_span(&mut self) -> Option<(i32, i32)> {
        self.cache
            .get(&self.config.data_path, &self.config.country)
            .series()
            .year_span()
    }

    /// The stored year selection clamped to the current data span, or the
    /// full span when nothing was selected yet.
    pub fn effective_year_range(&mut self) -> Option<(i32, i32)> {
        let (span_min, span_max) = self.gdp_year_span()?;
        let (min, max) = self.year_range.unwrap_or((span_min, span_max));
        let min = min.clamp(span_min, span_max);
        let max = max.clamp(min, span_max);
        Some((min, max))
    }

    /// Derive the filtered (and optionally smoothed) GDP view.
    pub fn gdp_view(&mut self) -> GdpView {
        let Some((min, max)) = self.effective_year_range() else {
            return GdpView::default();
        };
        let smoothing = self.smoothing;
        let outcome = self
            .cache
            .get(&self.config.data_path, &self.config.country);
        filter::gdp_view(outcome.series(), min, max, smoothing)
    }

    pub fn gdp_csv_bytes(&mut self) -> anyhow::Result<Vec<u8>> {
        export::gdp_csv(&self.gdp_view())
    }

    // -- Disaster tab -----------------------------------------------------

    /// Records passing the current event selection.
    pub fn disaster_rows(&self) -> Vec<DisasterRecord> {
        filter::filter_events(disaster::dataset(), &self.selected_events)
    }

    pub fn disaster_csv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        export::disaster_csv(&self.disaster_rows())
    }

    pub fn toggle_event(&mut self, event: &str) {
        if !self.selected_events.remove(event) {
            self.selected_events.insert(event.to_string());
        }
    }

    pub fn select_all_events(&mut self) {
        self.selected_events = disaster::dataset().events().into_iter().collect();
    }

    pub fn select_no_events(&mut self) {
        self.selected_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        // Nonexistent path: exercises the fallback series (24 monthly rows
        // over 2022–2023).
        let config = DashboardConfig {
            data_path: "no/such/gdp.csv".into(),
            ..DashboardConfig::default()
        };
        AppState::new(config)
    }

    #[test]
    fn starts_with_all_events_selected() {
        let state = test_state();
        assert_eq!(state.selected_events.len(), 3);
        assert_eq!(state.disaster_rows().len(), 13);
    }

    #[test]
    fn toggling_an_event_removes_and_restores_its_rows() {
        let mut state = test_state();
        state.toggle_event("태풍 카눈");
        assert_eq!(state.disaster_rows().len(), 9);
        state.toggle_event("태풍 카눈");
        assert_eq!(state.disaster_rows().len(), 13);
    }

    #[test]
    fn deselecting_everything_yields_an_empty_view() {
        let mut state = test_state();
        state.select_no_events();
        assert!(state.disaster_rows().is_empty());
        // The export of the empty view is still a valid header-only CSV.
        assert!(state.disaster_csv_bytes().unwrap().len() > 3);
    }

    #[test]
    fn year_range_is_clamped_to_the_data_span() {
        let mut state = test_state();
        let span = state.gdp_year_span().unwrap();
        state.year_range = Some((span.0 - 50, span.1 + 50));
        assert_eq!(state.effective_year_range(), Some(span));
    }

    #[test]
    fn gdp_view_honors_the_stored_range() {
        let mut state = test_state();
        state.year_range = Some((2022, 2022));
        let view = state.gdp_view();
        assert_eq!(view.rows.len(), 12);
    }

    #[test]
    fn smoothing_attaches_a_column_of_matching_length() {
        let mut state = test_state();
        state.smoothing = true;
        let view = state.gdp_view();
        assert_eq!(view.smoothed.as_ref().map(Vec::len), Some(view.rows.len()));
    }
}
