//! Settings panel for the Plant Identify GUI

use eframe::egui::{self, Color32, RichText, Ui};
use plantid_app::config::masked_key;
use plantid_app::Config;
use plantid_types::OutputFormat;

/// Preset Gemini models
const GEMINI_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro"];

/// Settings panel
pub struct SettingsPanel {
    /// API key input
    api_key_input: String,
    /// Model input (can be custom)
    model_input: String,
    /// Output format selection
    selected_format: OutputFormat,
    /// Whether config was modified
    modified: bool,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl SettingsPanel {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key_input: config.api_key.clone().unwrap_or_default(),
            model_input: config.model.clone(),
            selected_format: config.output_format,
            modified: false,
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &mut Config) {
        egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Settings");
        ui.add_space(10.0);

        // API key
        ui.label(RichText::new("API key").strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.api_key_input)
                    .password(true)
                    .desired_width(300.0),
            );
            if response.changed() {
                self.modified = true;
            }
            if ui.button("Clear").clicked() {
                self.api_key_input.clear();
                self.modified = true;
            }
        });

        ui.add_space(5.0);
        ui.label(
            RichText::new("Leave empty to use the GEMINI_API_KEY environment variable")
                .color(Color32::GRAY)
                .small(),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(15.0);

        // Model selection
        ui.label(RichText::new("Model").strong());
        ui.add_space(5.0);

        ui.label("Presets:");
        ui.horizontal_wrapped(|ui| {
            for model in GEMINI_MODELS {
                if ui.small_button(*model).clicked() {
                    self.model_input = model.to_string();
                    self.modified = true;
                }
            }
        });
        ui.add_space(5.0);

        // Custom model input
        ui.horizontal(|ui| {
            ui.label("Custom:");
            let response = ui.text_edit_singleline(&mut self.model_input);
            if response.changed() {
                self.modified = true;
            }
        });

        ui.add_space(5.0);
        ui.label(
            RichText::new("Empty falls back to the default model")
                .color(Color32::GRAY)
                .small(),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(15.0);

        // Output format (used by the CLI)
        ui.label(RichText::new("Output format").strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for format in [OutputFormat::Table, OutputFormat::Json] {
                let selected = self.selected_format == format;
                if ui.selectable_label(selected, format.to_string()).clicked() {
                    self.selected_format = format;
                    self.modified = true;
                }
            }
        });

        ui.add_space(20.0);
        ui.separator();
        ui.add_space(15.0);

        // Current config display
        ui.label(RichText::new("Current configuration").strong());
        ui.add_space(5.0);

        egui::Frame::new()
            .fill(Color32::from_gray(30))
            .inner_margin(10.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                egui::Grid::new("current_config")
                    .num_columns(2)
                    .spacing([20.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("API key:");
                        ui.label(masked_key(config.api_key.as_deref()));
                        ui.end_row();

                        ui.label("Model:");
                        ui.label(&config.model);
                        ui.end_row();

                        ui.label("Output format:");
                        ui.label(config.output_format.to_string());
                        ui.end_row();
                    });
            });

        ui.add_space(20.0);

        // Save button
        ui.horizontal(|ui| {
            let save_enabled = self.modified;
            if ui.add_enabled(save_enabled, egui::Button::new(
                RichText::new("💾 Save").size(16.0)
            )).clicked() {
                self.save_config(config);
            }

            if ui.button("Reset").clicked() {
                self.api_key_input = config.api_key.clone().unwrap_or_default();
                self.model_input = config.model.clone();
                self.selected_format = config.output_format;
                self.modified = false;
                self.status_message = None;
            }

            if self.modified {
                ui.label(RichText::new("* unsaved changes").color(Color32::YELLOW));
            }
        });

        // Status message
        if let Some((ref msg, is_error)) = self.status_message {
            ui.add_space(10.0);
            let color = if is_error { Color32::LIGHT_RED } else { Color32::LIGHT_GREEN };
            ui.label(RichText::new(msg).color(color));
        }
        }); // End ScrollArea
    }

    fn save_config(&mut self, config: &mut Config) {
        let api_key = self.api_key_input.trim();
        config.api_key = if api_key.is_empty() {
            None
        } else {
            Some(api_key.to_string())
        };

        let model = self.model_input.trim();
        config.model = if model.is_empty() {
            plantid_gemini::DEFAULT_MODEL.to_string()
        } else {
            model.to_string()
        };

        config.output_format = self.selected_format;

        match config.save() {
            Ok(()) => {
                self.modified = false;
                self.status_message = Some(("Settings saved".to_string(), false));
            }
            Err(e) => {
                self.status_message = Some((format!("Save error: {}", e), true));
            }
        }
    }
}
