//! Identify panel for the Plant Identify GUI
//!
//! Provides image selection, background identification, and result display.

use eframe::egui::{self, Color32, ColorImage, RichText, TextureHandle, Ui, Vec2};
use plantid_app::{identify_file, Config, IMAGE_EXTENSIONS};
use plantid_types::Plant;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Instant;

use crate::state::{RequestState, RequestTracker};

/// Completion message from an identification thread
type Completion = (u64, Result<Plant, String>);

/// Panel for identifying plants from images
pub struct IdentifyPanel {
    /// Currently selected image path
    selected_image: Option<PathBuf>,
    /// Lifecycle of the current request
    tracker: RequestTracker,
    /// Receiver for completions from background threads
    receiver: Option<Receiver<Completion>>,
    /// Time the latest request started
    start_time: Option<Instant>,
    /// Cached preview texture
    preview_texture: Option<TextureHandle>,
    /// Path the preview texture was loaded from
    preview_path: Option<PathBuf>,
}

impl IdentifyPanel {
    /// Create a new identify panel
    pub fn new() -> Self {
        Self {
            selected_image: None,
            tracker: RequestTracker::new(),
            receiver: None,
            start_time: None,
            preview_texture: None,
            preview_path: None,
        }
    }

    /// Render the identify panel UI
    pub fn ui(&mut self, ui: &mut Ui, config: &Config) {
        // Check for completions from background threads
        self.poll_completions(ui.ctx());

        ui.heading("Plant Identification");
        ui.add_space(10.0);

        self.render_image_selection(ui, config);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_identify_button(ui, config);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_result(ui);
    }

    /// Poll for completions from background identification threads
    fn poll_completions(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.receiver {
            // Drain all available messages
            loop {
                match receiver.try_recv() {
                    Ok((seq, result)) => {
                        self.tracker.complete(seq, result);
                        if !self.tracker.is_in_flight() {
                            self.receiver = None;
                            self.start_time = None;
                            return;
                        }
                    }
                    Err(std::sync::mpsc::TryRecvError::Empty) => {
                        // No message yet, request repaint to check again
                        ctx.request_repaint();
                        break;
                    }
                    Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                        self.tracker
                            .fail("identification thread exited unexpectedly".to_string());
                        self.receiver = None;
                        self.start_time = None;
                        return;
                    }
                }
            }
        }
    }

    /// Render the image selection section
    fn render_image_selection(&mut self, ui: &mut Ui, config: &Config) {
        ui.horizontal(|ui| {
            if ui.button("Select image...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image files", IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    self.selected_image = Some(path);
                    self.start_identification(config);
                }
            }

            ui.add_space(10.0);

            // Display selected image path
            if let Some(ref path) = self.selected_image {
                ui.label(
                    RichText::new(path.display().to_string())
                        .monospace()
                        .color(Color32::LIGHT_BLUE),
                );
            } else {
                ui.label(
                    RichText::new("No image selected")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
        });

        // Image preview
        if let Some(path) = self.selected_image.clone() {
            ui.add_space(8.0);
            if let Some(texture) = self.load_preview_texture(ui.ctx(), &path) {
                let size = Self::calc_preview_size(texture, 360.0, 240.0);
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
        }
    }

    /// Load the selected image into a texture, reusing the cached one when
    /// the path has not changed
    fn load_preview_texture(
        &mut self,
        ctx: &egui::Context,
        path: &Path,
    ) -> Option<&TextureHandle> {
        // Check if already loaded (cache hit)
        if self.preview_path.as_deref() == Some(path) {
            return self.preview_texture.as_ref();
        }

        // Mark as loaded to prevent re-processing on failure
        self.preview_path = Some(path.to_path_buf());
        self.preview_texture = None;

        if let Ok(img) = image::open(path) {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.into_raw();

            let color_image = ColorImage::from_rgba_unmultiplied(size, &pixels);

            let texture = ctx.load_texture(
                format!("preview_{}", path.display()),
                color_image,
                egui::TextureOptions::LINEAR,
            );

            self.preview_texture = Some(texture);
        }

        self.preview_texture.as_ref()
    }

    /// Calculate scaled size to fit within max dimensions while preserving aspect ratio
    fn calc_preview_size(texture: &TextureHandle, max_width: f32, max_height: f32) -> Vec2 {
        let original_size = texture.size_vec2();
        let scale_x = max_width / original_size.x;
        let scale_y = max_height / original_size.y;
        let scale = scale_x.min(scale_y);
        Vec2::new(original_size.x * scale, original_size.y * scale)
    }

    /// Render the identify button and progress
    fn render_identify_button(&mut self, ui: &mut Ui, config: &Config) {
        let in_flight = self.tracker.is_in_flight();
        let can_identify = self.selected_image.is_some() && !in_flight;

        ui.horizontal(|ui| {
            let button_text = if in_flight {
                "Identifying..."
            } else {
                "Identify"
            };

            let button = egui::Button::new(RichText::new(button_text).size(16.0));

            if ui.add_enabled(can_identify, button).clicked() {
                self.start_identification(config);
            }

            if in_flight {
                ui.spinner();
            }
        });

        // Show progress details
        if in_flight {
            ui.add_space(8.0);

            egui::Frame::new()
                .fill(Color32::from_gray(30))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    // Elapsed time
                    if let Some(start) = self.start_time {
                        let elapsed = start.elapsed().as_secs_f32();
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Elapsed:").strong());
                            ui.label(format!("{:.1} s", elapsed));
                        });
                    }

                    // Model info
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Model:").strong());
                        ui.label(&config.model);
                    });

                    // Image being identified
                    if let Some(ref path) = self.selected_image {
                        if let Some(file_name) = path.file_name() {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("Image:").strong());
                                ui.label(file_name.to_string_lossy().to_string());
                            });
                        }
                    }
                });
        }
    }

    /// Start identification in a background thread
    fn start_identification(&mut self, config: &Config) {
        let Some(ref image_path) = self.selected_image else {
            return;
        };

        let seq = self.tracker.begin();
        self.start_time = Some(Instant::now());

        // Each request gets its own channel; a superseded request ends up
        // sending into a dropped receiver
        let (sender, receiver) = channel::<Completion>();
        self.receiver = Some(receiver);

        // Clone data for thread
        let image_path = image_path.clone();
        let config = config.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = sender.send((seq, Err(e.to_string())));
                    return;
                }
            };

            let result = runtime.block_on(identify_file(&image_path, &config, None));
            let _ = sender.send((seq, result.map_err(|e| e.to_string())));
        });
    }

    /// Render the identification result
    fn render_result(&self, ui: &mut Ui) {
        ui.label(RichText::new("Result").strong().size(14.0));
        ui.add_space(5.0);

        match self.tracker.state() {
            RequestState::Idle => {
                ui.label(
                    RichText::new("Select an image to identify a plant")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
            RequestState::InFlight => {
                ui.label(
                    RichText::new("Waiting for the model...")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
            RequestState::Succeeded(plant) => {
                // Display results in a grid for alignment
                egui::Grid::new("result_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Name:").strong());
                        ui.label(
                            RichText::new(&plant.name)
                                .color(Color32::LIGHT_GREEN)
                                .strong(),
                        );
                        ui.end_row();
                    });

                if !plant.description.is_empty() {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Description:").strong());
                    ui.add_space(3.0);

                    egui::Frame::new()
                        .fill(Color32::from_gray(40))
                        .inner_margin(8.0)
                        .corner_radius(4.0)
                        .show(ui, |ui| {
                            ui.label(&plant.description);
                        });
                }
            }
            RequestState::Failed(message) => {
                egui::Frame::new()
                    .fill(Color32::from_rgb(80, 20, 20))
                    .inner_margin(8.0)
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("Error: {}", message))
                                .color(Color32::LIGHT_RED),
                        );
                    });
            }
        }
    }
}

impl Default for IdentifyPanel {
    fn default() -> Self {
        Self::new()
    }
}
