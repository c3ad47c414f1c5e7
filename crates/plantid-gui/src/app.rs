//! Main application structure with tab navigation

use eframe::egui;
use plantid_app::Config;

use crate::identify_panel::IdentifyPanel;
use crate::settings_panel::SettingsPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Identify,
    Settings,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Identify => "Identify",
            Tab::Settings => "Settings",
        }
    }
}

/// Main application state
pub struct PlantIdApp {
    /// Currently selected tab
    current_tab: Tab,
    /// Identify panel state
    identify_panel: IdentifyPanel,
    /// Settings panel state
    settings_panel: SettingsPanel,
    /// Application configuration
    config: Config,
}

impl PlantIdApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Load configuration
        let config = Config::load().unwrap_or_default();

        let settings_panel = SettingsPanel::new(&config);

        Self {
            current_tab: Tab::default(),
            identify_panel: IdentifyPanel::new(),
            settings_panel,
            config,
        }
    }

    /// Render the tab bar
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            for tab in [Tab::Identify, Tab::Settings] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for PlantIdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel with tab bar
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        // Central panel with selected tab content
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.current_tab {
                Tab::Identify => {
                    self.identify_panel.ui(ui, &self.config);
                }
                Tab::Settings => {
                    self.settings_panel.ui(ui, &mut self.config);
                }
            }
        });
    }
}
