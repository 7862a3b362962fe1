use crate::app::PinviewApp;
use crate::messages::WorkerCommand;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

pub fn show(ctx: &egui::Context, app: &mut PinviewApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let detections_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::D);
    let reset_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Num0);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(app);
                }

                if ui.add(egui::Button::new("Open Detections...").shortcut_text(ctx.format_shortcut(&detections_shortcut))).clicked() {
                    ui.close();
                    open_detections(app);
                }

                ui.separator();

                if ui.button("Load Viewport Config...").clicked() {
                    ui.close();
                    app.pick_and_send("TOML", &["toml"], |path| WorkerCommand::LoadConfig { path });
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.add(egui::Button::new("Reset View").shortcut_text(ctx.format_shortcut(&reset_shortcut))).clicked() {
                    ui.close();
                    app.view.viewport.reset_view();
                }

                let selected = app.ui_state.selected;
                if ui.add_enabled(selected.is_some(), egui::Button::new("Focus Selected")).clicked() {
                    ui.close();
                    if let Some(index) = selected {
                        app.view.viewport.focus_on_annotation(index);
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&detections_shortcut)) {
            open_detections(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&reset_shortcut)) {
            app.view.viewport.reset_view();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_image(app: &PinviewApp) {
    app.pick_and_send("Images", IMAGE_EXTENSIONS, |path| WorkerCommand::LoadImage { path });
}

fn open_detections(app: &PinviewApp) {
    app.pick_and_send("Detections JSON", &["json"], |path| WorkerCommand::LoadDetections { path });
}
