use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::disaster;
use crate::data::export;
use crate::data::model::{DisasterRecord, GdpView};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: tab switcher, row counts, status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.heading("Climate Impact Dashboard");
        ui.separator();

        if ui
            .selectable_label(state.tab == Tab::Gdp, "GDP trends")
            .clicked()
        {
            state.tab = Tab::Gdp;
        }
        if ui
            .selectable_label(state.tab == Tab::Disasters, "School disruptions")
            .clicked()
        {
            state.tab = Tab::Disasters;
        }

        ui.separator();

        match state.tab {
            Tab::Gdp => {
                let visible = state.gdp_view().rows.len();
                ui.label(format!("{visible} observations visible"));
            }
            Tab::Disasters => {
                let total = disaster::dataset().len();
                let visible = state.disaster_rows().len();
                ui.label(format!("{visible}/{total} records visible"));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel for the active tab.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::Gdp => gdp_filters(ui, state),
            Tab::Disasters => disaster_filters(ui, state),
        });
}

fn gdp_filters(ui: &mut Ui, state: &mut AppState) {
    let Some((span_min, span_max)) = state.gdp_year_span() else {
        ui.label("No data in the current selection.");
        return;
    };
    let (mut min, mut max) = state
        .effective_year_range()
        .unwrap_or((span_min, span_max));

    ui.strong("Year range");
    ui.add(egui::Slider::new(&mut min, span_min..=span_max).text("from"));
    ui.add(egui::Slider::new(&mut max, span_min..=span_max).text("to"));
    if max < min {
        max = min;
    }
    state.year_range = Some((min, max));

    ui.separator();
    ui.checkbox(&mut state.smoothing, "Show 3-period moving average");

    if let Some(reason) = state.fallback_reason() {
        ui.separator();
        ui.label(
            RichText::new(format!(
                "Source data unavailable – showing placeholder data.\n({reason})"
            ))
            .color(Color32::YELLOW),
        );
    }
}

fn disaster_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Disaster events");

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_events();
        }
        if ui.small_button("None").clicked() {
            state.select_no_events();
        }
    });

    for event in disaster::dataset().events() {
        let mut checked = state.selected_events.contains(&event);
        if ui.checkbox(&mut checked, &event).changed() {
            state.toggle_event(&event);
        }
    }
}

// ---------------------------------------------------------------------------
// Data preview tables
// ---------------------------------------------------------------------------

/// GDP data preview: the rows exactly as they would be downloaded.
pub fn gdp_table(ui: &mut Ui, view: &GdpView) {
    let has_smooth = view.smoothed.is_some();
    let n_cols = if has_smooth { 3 } else { 2 };

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), n_cols - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("date");
            });
            header.col(|ui| {
                ui.strong("gdp");
            });
            if has_smooth {
                header.col(|ui| {
                    ui.strong("gdp_smooth");
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.rows.len(), |mut row| {
                let r = &view.rows[row.index()];
                let smooth = view.smoothed.as_ref().map(|s| s[row.index()]);
                row.col(|ui| {
                    ui.label(r.date.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", r.gdp));
                });
                if let Some(smooth) = smooth {
                    row.col(|ui| {
                        ui.label(format!("{smooth:.1}"));
                    });
                }
            });
        });
}

/// Disruption data preview.
pub fn disaster_table(ui: &mut Ui, records: &[DisasterRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), 6)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["event", "year", "region", "group", "value", "unit", "date"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let r = &records[row.index()];
                row.col(|ui| {
                    ui.label(&r.event);
                });
                row.col(|ui| {
                    ui.label(r.year.to_string());
                });
                row.col(|ui| {
                    ui.label(&r.region);
                });
                row.col(|ui| {
                    ui.label(&r.group);
                });
                row.col(|ui| {
                    ui.label(r.value.to_string());
                });
                row.col(|ui| {
                    ui.label(&r.unit);
                });
                row.col(|ui| {
                    ui.label(r.date.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Download buttons
// ---------------------------------------------------------------------------

/// Offer the current GDP view as a CSV download.
pub fn gdp_download_button(ui: &mut Ui, state: &mut AppState) {
    if ui.button("Download processed data (CSV)").clicked() {
        match state.gdp_csv_bytes() {
            Ok(bytes) => save_csv(state, &bytes, export::GDP_FILENAME),
            Err(e) => state.status_message = Some(format!("Export failed: {e:#}")),
        }
    }
}

/// Offer the current disruption view as a CSV download.
pub fn disaster_download_button(ui: &mut Ui, state: &mut AppState) {
    if ui.button("Download processed data (CSV)").clicked() {
        match state.disaster_csv_bytes() {
            Ok(bytes) => save_csv(state, &bytes, export::DISASTER_FILENAME),
            Err(e) => state.status_message = Some(format!("Export failed: {e:#}")),
        }
    }
}

fn save_csv(state: &mut AppState, bytes: &[u8], filename: &str) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save processed data")
        .set_file_name(filename)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, bytes) {
        Ok(()) => {
            log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to write {}: {e}", path.display());
            state.status_message = Some(format!("Save failed: {e}"));
        }
    }
}
