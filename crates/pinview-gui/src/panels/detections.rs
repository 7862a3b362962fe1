use crate::app::PinviewApp;
use crate::panels::section_header;

/// Row edits collected while the detection list is borrowed.
enum RowAction {
    Verify(usize, bool),
    Show(usize, bool),
    Focus(usize),
    Select(usize),
}

pub fn show(ctx: &egui::Context, app: &mut PinviewApp) {
    egui::SidePanel::right("detections")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            let Some(set) = app.view.session.current_detections() else {
                ui.label("No detections loaded");
                return;
            };

            let (verified, total) = set.verified_counts();
            section_header(ui, "Detections", Some(&format!("{verified}/{total} verified")));
            ui.separator();

            let mut limit = app.view.session.detection_limit();
            let slider = ui.add(
                egui::Slider::new(&mut limit, 0.0..=1.0)
                    .text("Min confidence")
                    .fixed_decimals(2),
            );
            ui.separator();

            let mut actions = Vec::new();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for det in set.iter() {
                    let element = app.view.viewport.annotation(det.index);
                    let selected = app.ui_state.selected == Some(det.index);

                    ui.horizontal(|ui| {
                        let text = format!("{} {} ({:.0}%)", det.index, det.label, det.confidence * 100.0);
                        if ui.selectable_label(selected, text).clicked() {
                            actions.push(RowAction::Select(det.index));
                        }
                    });
                    ui.horizontal(|ui| {
                        let mut checked = det.verified;
                        if ui.checkbox(&mut checked, "verified").changed() {
                            actions.push(RowAction::Verify(det.index, checked));
                        }

                        // Detections under the threshold have no overlay.
                        let mut visible = element.is_some_and(|e| e.visible);
                        let toggle = ui.add_enabled(element.is_some(), egui::Checkbox::new(&mut visible, "shown"));
                        if toggle.changed() {
                            actions.push(RowAction::Show(det.index, visible));
                        }

                        if ui.add_enabled(element.is_some(), egui::Button::new("Focus")).clicked() {
                            actions.push(RowAction::Focus(det.index));
                        }
                    });
                    ui.add_space(4.0);
                }
            });

            if slider.changed() {
                app.view
                    .session
                    .set_detection_limit(limit, &mut app.view.viewport);
            }
            for action in actions {
                apply(app, action);
            }
        });
}

fn apply(app: &mut PinviewApp, action: RowAction) {
    match action {
        RowAction::Verify(index, verified) => {
            app.view.session.set_verified(index, verified);
        }
        RowAction::Show(index, visible) => {
            app.view
                .session
                .set_annotation_visible(index, visible, &mut app.view.viewport);
        }
        RowAction::Focus(index) => {
            app.ui_state.selected = Some(index);
            app.view.viewport.focus_on_annotation(index);
        }
        RowAction::Select(index) => {
            app.ui_state.selected = Some(index);
        }
    }
}
