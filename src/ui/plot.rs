use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::CategoryColors;
use crate::data::disaster;
use crate::data::filter;
use crate::data::model::{DisasterRecord, GdpView};

// ---------------------------------------------------------------------------
// GDP charts (left: line, right: bars)
// ---------------------------------------------------------------------------

const GDP_COLOR: Color32 = Color32::from_rgb(0xff, 0x63, 0x47);
const SMOOTH_COLOR: Color32 = Color32::LIGHT_BLUE;

/// Fractional-year position so yearly and monthly rows share one axis.
fn date_to_x(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

/// Render the GDP line chart and the yearly bar chart side by side.
/// An empty view draws two empty plots, which egui_plot handles fine.
pub fn gdp_charts(ui: &mut Ui, view: &GdpView) {
    ui.columns(2, |columns| {
        gdp_line_chart(&mut columns[0], view);
        gdp_bar_chart(&mut columns[1], view);
    });
}

fn gdp_line_chart(ui: &mut Ui, view: &GdpView) {
    ui.strong("GDP over time");
    Plot::new("gdp_line")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("GDP (current US$)")
        .height(260.0)
        .show(ui, |plot_ui| {
            let points: PlotPoints = view
                .rows
                .iter()
                .map(|r| [date_to_x(r.date), r.gdp])
                .collect();
            plot_ui.line(Line::new(points).name("GDP").color(GDP_COLOR).width(1.5));

            if let Some(smoothed) = &view.smoothed {
                let points: PlotPoints = view
                    .rows
                    .iter()
                    .zip(smoothed)
                    .map(|(r, &s)| [date_to_x(r.date), s])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name("3-period average")
                        .color(SMOOTH_COLOR)
                        .width(1.5),
                );
            }
        });
}

fn gdp_bar_chart(ui: &mut Ui, view: &GdpView) {
    ui.strong("GDP per period");

    // Bars sized to the smallest gap between observations, so the yearly
    // series and the monthly fallback series both render without overlap.
    let xs: Vec<f64> = view.rows.iter().map(|r| date_to_x(r.date)).collect();
    let width = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    let width = if width.is_finite() { width * 0.8 } else { 0.8 };

    let bars: Vec<Bar> = view
        .rows
        .iter()
        .zip(&xs)
        .map(|(r, &x)| Bar::new(x, r.gdp).width(width))
        .collect();

    Plot::new("gdp_bars")
        .x_axis_label("Year")
        .y_axis_label("GDP (current US$)")
        .height(260.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("GDP").color(GDP_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Disaster charts
// ---------------------------------------------------------------------------

/// Grouped bar chart of disruption counts per event, coloured by action
/// type, with the two detail charts below.
pub fn disaster_charts(ui: &mut Ui, records: &[DisasterRecord], colors: &CategoryColors) {
    ui.strong("Disruptions per event and action type");
    grouped_event_chart(ui, records, colors);

    ui.add_space(8.0);
    ui.columns(2, |columns| {
        region_chart(&mut columns[0], records);
        nationwide_rain_chart(&mut columns[1], records, colors);
    });
}

fn grouped_event_chart(ui: &mut Ui, records: &[DisasterRecord], colors: &CategoryColors) {
    // Stable slot per event and per action type, independent of filtering,
    // so bars do not jump around as selections change.
    let events = disaster::dataset().events();
    let groups = disaster::dataset().groups();
    let slot_width = 0.8 / groups.len().max(1) as f64;

    let mut charts: Vec<BarChart> = Vec::new();
    for (g_idx, group) in groups.iter().enumerate() {
        let bars: Vec<Bar> = records
            .iter()
            .filter(|r| r.group == *group)
            .filter_map(|r| {
                let e_idx = events.iter().position(|e| e == &r.event)?;
                let x = e_idx as f64 - 0.4
                    + slot_width * (g_idx as f64 + 0.5);
                Some(Bar::new(x, f64::from(r.value)).width(slot_width * 0.9))
            })
            .collect();
        if !bars.is_empty() {
            charts.push(
                BarChart::new(bars)
                    .name(group)
                    .color(colors.color_for(group)),
            );
        }
    }

    let axis_events = events.clone();
    Plot::new("disaster_grouped")
        .legend(Legend::default())
        .y_axis_label("Affected schools/sites")
        .x_axis_formatter(move |mark, _range| event_tick_label(&axis_events, mark.value))
        .height(240.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn region_chart(ui: &mut Ui, records: &[DisasterRecord]) {
    ui.strong("Totals per region (전국 excluded)");

    let totals = filter::region_totals(records, disaster::NATIONWIDE_REGION);
    let overall: u64 = totals.iter().map(|(_, v)| v).sum();

    let labels: Vec<String> = totals
        .iter()
        .map(|(region, value)| {
            if overall > 0 {
                format!("{region} ({:.0}%)", *value as f64 / overall as f64 * 100.0)
            } else {
                region.clone()
            }
        })
        .collect();

    let region_colors = CategoryColors::new(labels.iter().cloned());
    let charts: Vec<BarChart> = totals
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, ((_, value), label))| {
            BarChart::new(vec![Bar::new(i as f64, *value as f64).width(0.6)])
                .name(label)
                .color(region_colors.color_for(label))
        })
        .collect();

    let axis_labels: Vec<String> = totals.iter().map(|(region, _)| region.clone()).collect();
    Plot::new("disaster_regions")
        .legend(Legend::default())
        .y_axis_label("Affected schools/sites")
        .x_axis_formatter(move |mark, _range| event_tick_label(&axis_labels, mark.value))
        .height(220.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn nationwide_rain_chart(ui: &mut Ui, records: &[DisasterRecord], colors: &CategoryColors) {
    ui.strong("2025 전국 폭우 breakdown");

    let rain: Vec<&DisasterRecord> = records
        .iter()
        .filter(|r| r.event == "전국 폭우")
        .collect();

    if rain.is_empty() {
        ui.label("'전국 폭우' is not selected.");
        return;
    }

    let charts: Vec<BarChart> = rain
        .iter()
        .enumerate()
        .map(|(i, r)| {
            BarChart::new(vec![Bar::new(i as f64, f64::from(r.value)).width(0.6)])
                .name(&r.group)
                .color(colors.color_for(&r.group))
        })
        .collect();

    let axis_labels: Vec<String> = rain.iter().map(|r| r.group.clone()).collect();
    Plot::new("disaster_rain_detail")
        .y_axis_label("Affected schools/sites")
        .x_axis_formatter(move |mark, _range| event_tick_label(&axis_labels, mark.value))
        .height(220.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label integer tick positions with the matching category, everything
/// else with an empty string.
fn event_tick_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.05 || idx < 0.0 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .cloned()
        .unwrap_or_default()
}
