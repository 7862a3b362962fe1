use pinview_core::{AnnotationElement, InputEvent, RenderFrame};

use crate::app::PinviewApp;
use crate::convert::{to_container, to_screen_pos, to_screen_rect};

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 64, 64);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 210, 0);

pub fn show(ctx: &egui::Context, app: &mut PinviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(texture_id) = app.view.texture.as_ref().map(|t| t.id()) else {
            show_placeholder(ui);
            return;
        };

        sync_container_size(app, rect);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_pointer(ui, &response, app, rect.min);
        handle_wheel(ui, &response, app, rect.min);

        if response.double_clicked() {
            app.view.viewport.reset_view();
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_container(pos, rect.min);
                app.ui_state.selected = app.view.viewport.annotation_at(x, y);
            }
        }

        app.view.sync_frame();
        if let Some(ref frame) = app.view.frame {
            let painter = ui.painter_at(rect);
            draw_image(&painter, texture_id, frame, rect.min);
            for element in &frame.annotations {
                let selected = app.ui_state.selected == Some(element.index);
                draw_annotation(&painter, element, selected, rect.min);
            }
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Push the panel size to the viewport whenever it changes.
fn sync_container_size(app: &mut PinviewApp, rect: egui::Rect) {
    let size = rect.size();
    if app.view.container_size != Some(size) {
        app.view.container_size = Some(size);
        app.view
            .viewport
            .update_container_size(size.x as f64, size.y as f64);
    }
}

fn handle_pointer(ui: &egui::Ui, response: &egui::Response, app: &mut PinviewApp, origin: egui::Pos2) {
    let pointer = response.interact_pointer_pos();
    let viewport = &mut app.view.viewport;

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = pointer {
            let (x, y) = to_container(pos, origin);
            viewport.handle_input(&InputEvent::PointerDown { x, y });
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = pointer {
            let (x, y) = to_container(pos, origin);
            viewport.handle_input(&InputEvent::PointerMove { x, y });
        }
    }

    if response.drag_stopped() {
        viewport.handle_input(&InputEvent::PointerUp);
    } else if viewport.is_dragging() && !ui.rect_contains_pointer(response.rect) {
        viewport.handle_input(&InputEvent::PointerLeave);
    }
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut PinviewApp, origin: egui::Pos2) {
    if !response.hovered() {
        return;
    }
    // egui reports scrolling up as positive; the viewport expects the
    // opposite sign convention.
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll == 0.0 {
        return;
    }
    if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
        let (x, y) = to_container(pos, origin);
        app.view.viewport.handle_input(&InputEvent::Wheel {
            delta_y: -scroll as f64,
            x,
            y,
        });
    }
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, frame: &RenderFrame, origin: egui::Pos2) {
    let Some(image_rect) = frame.image_rect else {
        return;
    };
    painter.image(
        texture_id,
        to_screen_rect(image_rect, origin),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_annotation(painter: &egui::Painter, element: &AnnotationElement, selected: bool, origin: egui::Pos2) {
    let color = if selected { SELECTED_COLOR } else { BOX_COLOR };
    let stroke = egui::Stroke::new(element.screen_stroke_width() as f32, color);
    painter.rect_stroke(
        to_screen_rect(element.screen_rect, origin),
        0.0,
        stroke,
        egui::StrokeKind::Outside,
    );

    let label = &element.label;
    let font = egui::FontId::proportional(element.screen_font_size() as f32);
    let galley = painter.layout_no_wrap(label.text.clone(), font, egui::Color32::WHITE);
    let text_rect = egui::Rect::from_min_size(to_screen_pos(label.anchor, origin), galley.size())
        .expand(2.0);
    painter.rect_filled(text_rect, 2.0, color.gamma_multiply(0.8));
    painter.galley(text_rect.min + egui::vec2(2.0, 2.0), galley, egui::Color32::WHITE);
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
