use crate::file_intake::interface::CandidateFile;
use crate::file_intake::media_type::media_type_for_path;
use crate::interaction::core::{Msg, Phase};
use crate::library::logger::interface::Logger;
use crate::screen::interface::{Screen, View};
use eframe::egui;
use std::error::Error;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

struct ClassifierWindow {
    view: Arc<Mutex<Option<View>>>,
    msg_sender: Sender<Msg>,
    logger: Arc<dyn Logger + Send + Sync>,
    hovering: bool,
}

impl ClassifierWindow {
    fn send(&self, msg: Msg) {
        if self.msg_sender.send(msg).is_err() {
            let _ = self.logger.warn("controller stopped; dropping input");
        }
    }

    fn load(&self, path: &Path) -> Option<CandidateFile> {
        match CandidateFile::from_path(path) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("could not read {}: {}", path.display(), e));
                None
            }
        }
    }

    fn candidate_from_drop(&self, file: &egui::DroppedFile) -> Option<CandidateFile> {
        if let Some(path) = &file.path {
            return self.load(path);
        }
        file.bytes.as_ref().map(|bytes| {
            CandidateFile::new(
                &file.name,
                media_type_for_path(Path::new(&file.name)),
                bytes.to_vec(),
            )
        })
    }

    fn forward_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if hovering && !self.hovering {
            self.send(Msg::DragEnter);
        } else if !hovering && self.hovering && dropped.is_empty() {
            self.send(Msg::DragLeave);
        }
        self.hovering = hovering;

        // Only the first of several dropped files is considered.
        if let Some(file) = dropped.first() {
            let candidate = self.candidate_from_drop(file);
            self.send(Msg::Drop(candidate));
        }
    }

    fn pick_file(&self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select a vehicle image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file();

        if let Some(path) = picked {
            let candidate = self.load(&path);
            self.send(Msg::SelectFile(candidate));
        }
    }

    fn draw(&self, ui: &mut egui::Ui, view: &View) {
        let zone_color = if view.is_drag_over {
            egui::Color32::from_rgb(90, 140, 255)
        } else {
            egui::Color32::from_rgb(100, 100, 100)
        };

        egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, zone_color))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(view.status.as_str());

                match &view.file_name {
                    Some(file_name) => {
                        ui.label(format!("📄 {}", file_name));
                        if let Some(location) = &view.preview_location {
                            ui.small(location.display().to_string());
                        }
                    }
                    None => {
                        ui.small("Supports JPG, PNG, WEBP");
                    }
                }
            });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(view.can_browse, egui::Button::new("Browse files"))
                .clicked()
            {
                self.pick_file();
            }
            if ui
                .add_enabled(view.can_remove, egui::Button::new("✕ Remove"))
                .clicked()
            {
                self.send(Msg::RemoveFile);
            }
            let classify_label = if view.phase == Phase::Loading {
                "Analyzing..."
            } else {
                "Classify Vehicle"
            };
            if ui
                .add_enabled(view.can_classify, egui::Button::new(classify_label))
                .clicked()
            {
                self.send(Msg::Classify);
            }
        });

        if view.phase == Phase::Loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Waiting for the classification server...");
            });
        }

        if let Some(error) = &view.error {
            ui.colored_label(
                egui::Color32::from_rgb(220, 80, 80),
                format!("⚠ {}", error),
            );
        }

        if let Some(prediction) = &view.prediction {
            ui.add_space(8.0);
            ui.label("Classification Result");
            ui.heading(prediction.label.as_str());
            ui.add(
                egui::ProgressBar::new(prediction.fill_fraction.clamp(0.0, 1.0) as f32)
                    .text(format!("Confidence {}", prediction.percent_label)),
            );
        }
    }
}

impl eframe::App for ClassifierWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.forward_drag_and_drop(ctx);

        let view = match self.view.lock() {
            Ok(view) => view.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("EV Vehicle Classifier");
            ui.label("Drop an image of an electric vehicle to identify if it's a bus or car");
            ui.separator();

            match &view {
                Some(view) => self.draw(ui, view),
                None => {
                    ui.label("Starting...");
                }
            }
        });

        // The controller updates the view from its own thread.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Keeps the latest view for the window to draw.
#[derive(Clone)]
pub struct ScreenGui {
    view: Arc<Mutex<Option<View>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ScreenGui {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            view: Arc::new(Mutex::new(None)),
            logger: logger.with_namespace("gui"),
        }
    }

    /// Blocks the calling thread until the window is closed.
    pub fn run_window(&self, msg_sender: Sender<Msg>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 420.0])
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let window = ClassifierWindow {
            view: self.view.clone(),
            msg_sender,
            logger: self.logger.clone(),
            hovering: false,
        };

        eframe::run_native(
            "EV Vehicle Classifier",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl Screen for ScreenGui {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut current = match self.view.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = Some(view.clone());
        Ok(())
    }
}
