use std::path::{Path, PathBuf};
use std::sync::mpsc;

use pinview_core::detection::AnalysisResponse;
use pinview_core::DetectionSet;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::worker;

pub struct PinviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub view: ViewportState,
    pub show_about: bool,
}

impl PinviewApp {
    pub fn new(ctx: &egui::Context) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone())?;

        Ok(Self {
            cmd_tx,
            result_rx,
            ui_state: UIState::default(),
            view: ViewportState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded {
                    path,
                    image,
                    natural_width,
                    natural_height,
                } => {
                    let texture = ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR);
                    self.view.texture = Some(texture);

                    let name = file_name(&path);
                    let id = self
                        .view
                        .session
                        .add_image(name.clone(), natural_width, natural_height);
                    self.view.session.select_image(id, &mut self.view.viewport);
                    self.ui_state.selected = None;
                    self.ui_state.image_path = Some(path);
                    self.ui_state
                        .add_log(format!("Opened: {name} ({natural_width}x{natural_height})"));

                    if let Some(set) = self.ui_state.pending_detections.take() {
                        self.apply_detections(set);
                    }
                }
                WorkerResult::DetectionsLoaded { path, response } => {
                    self.ui_state
                        .add_log(format!("Loaded detections: {}", path.display()));
                    self.ui_state.detections_path = Some(path);
                    let set = self.pick_result_set(response);
                    if self.view.session.current().is_some() {
                        self.apply_detections(set);
                    } else {
                        self.ui_state.pending_detections = Some(set);
                    }
                }
                WorkerResult::ConfigLoaded { path, config } => {
                    self.view.apply_config(config);
                    self.ui_state
                        .add_log(format!("Viewport config loaded: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Choose the result set for the open image.
    fn pick_result_set(&mut self, mut response: AnalysisResponse) -> DetectionSet {
        for error in &response.errors {
            self.ui_state.add_log(format!("Detector: {error}"));
        }
        let current = self.ui_state.image_path.as_deref().map(file_name);
        response
            .take_for_image(current.as_deref())
            .unwrap_or_default()
    }

    fn apply_detections(&mut self, set: DetectionSet) {
        let Some(id) = self.view.session.current() else {
            return;
        };
        let count = set.len();
        self.view
            .session
            .apply_results(id, set, &mut self.view.viewport);
        self.ui_state.selected = None;
        self.ui_state.add_log(format!(
            "{count} detections, {} shown",
            self.view.viewport.annotation_count()
        ));
    }

    /// Ask the user for a file on a helper thread, then hand the path to
    /// the worker.
    pub fn pick_and_send<F>(&self, filter: &'static str, extensions: &'static [&'static str], make: F)
    where
        F: FnOnce(PathBuf) -> WorkerCommand + Send + 'static,
    {
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter(filter, extensions)
                .add_filter("All files", &["*"])
                .pick_file()
            {
                let _ = cmd_tx.send(make(path));
            }
        });
    }
}

impl eframe::App for PinviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::detections::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Pinview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Pinview");
                        ui.label("Detection overlay viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
