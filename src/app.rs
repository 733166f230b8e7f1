use eframe::egui;

use crate::color::CategoryColors;
use crate::config::DashboardConfig;
use crate::data::disaster;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClimateDashApp {
    pub state: AppState,
    /// Stable colour per action type, shared by both disaster charts.
    group_colors: CategoryColors,
}

impl ClimateDashApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
            group_colors: CategoryColors::new(disaster::dataset().groups()),
        }
    }
}

impl eframe::App for ClimateDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: tabs + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, data preview, download ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Gdp => self.gdp_tab(ui),
            Tab::Disasters => self.disaster_tab(ui),
        });
    }
}

impl ClimateDashApp {
    fn gdp_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Yearly GDP (World Bank export)");

        let view = self.state.gdp_view();
        plot::gdp_charts(ui, &view);

        ui.add_space(8.0);
        ui.collapsing("Data", |ui| {
            panels::gdp_table(ui, &view);
        });
        panels::gdp_download_button(ui, &mut self.state);
    }

    fn disaster_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("School disruptions from weather disasters");

        let records = self.state.disaster_rows();
        plot::disaster_charts(ui, &records, &self.group_colors);

        ui.add_space(8.0);
        ui.collapsing("Data", |ui| {
            panels::disaster_table(ui, &records);
        });
        panels::disaster_download_button(ui, &mut self.state);
    }
}
