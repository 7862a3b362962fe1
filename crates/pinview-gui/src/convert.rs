use pinview_core::{Point, Rect};

/// Convert a decoded RGBA image to an egui ColorImage.
pub fn rgba_to_color_image(image: &image::RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Container-relative point to absolute screen position.
pub fn to_screen_pos(p: Point, origin: egui::Pos2) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

/// Container-relative rectangle to an absolute egui rect.
pub fn to_screen_rect(r: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        to_screen_pos(Point::new(r.x, r.y), origin),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

/// Absolute screen position to container-relative coordinates.
pub fn to_container(pos: egui::Pos2, origin: egui::Pos2) -> (f64, f64) {
    let rel = pos - origin;
    (rel.x as f64, rel.y as f64)
}
