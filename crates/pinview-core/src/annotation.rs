use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LABEL_FONT_SIZE, DEFAULT_LABEL_GAP, DEFAULT_STROKE_WIDTH};
use crate::detection::Detection;
use crate::geometry::{Point, Rect};

/// Screen-space appearance targets for annotation overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub stroke_width: f64,
    pub label_font_size: f64,
    pub label_gap: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            label_gap: DEFAULT_LABEL_GAP,
        }
    }
}

/// Text label attached below the bottom-left corner of an annotation box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelBox {
    pub text: String,
    /// Top-left of the label in screen space.
    pub anchor: Point,
    /// Font size in image-layer units; multiply by the view scale for pixels.
    pub font_size: f64,
}

/// Rendered overlay for one detection: a box plus its label.
///
/// The box-model geometry lives in the image layer, so stroke and label sizes
/// are stored divided by the view scale (`counter_scale = 1 / scale`). Once the
/// layer transform is applied they come out at the constant screen size given
/// by the [`OverlayStyle`], while the box itself follows the zoom.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotationElement {
    pub index: usize,
    /// Source box in natural-image pixels.
    pub bbox: Rect,
    /// Current box in container pixels.
    pub screen_rect: Rect,
    pub label: LabelBox,
    /// Border thickness in image-layer units.
    pub stroke_width: f64,
    pub counter_scale: f64,
    pub visible: bool,
    /// `false` until the viewport could project the box at least once.
    pub laid_out: bool,
}

impl AnnotationElement {
    pub(crate) fn new(detection: &Detection) -> Self {
        Self {
            index: detection.index,
            bbox: detection.bbox_rect(),
            screen_rect: Rect::default(),
            label: LabelBox {
                text: detection.label.clone(),
                anchor: Point::default(),
                font_size: 0.0,
            },
            stroke_width: 0.0,
            counter_scale: 1.0,
            visible: true,
            laid_out: false,
        }
    }

    /// Place the element at `screen_rect` and re-derive the counter-scaled
    /// stroke and label sizes for `scale`.
    pub(crate) fn relayout(&mut self, screen_rect: Rect, scale: f64, style: &OverlayStyle) {
        self.counter_scale = 1.0 / scale;
        self.screen_rect = screen_rect;
        self.stroke_width = style.stroke_width * self.counter_scale;
        self.label.font_size = style.label_font_size * self.counter_scale;
        self.label.anchor = Point::new(screen_rect.x, screen_rect.bottom() + style.label_gap);
        self.laid_out = true;
    }

    /// Border thickness as it appears on screen.
    pub fn screen_stroke_width(&self) -> f64 {
        self.stroke_width / self.counter_scale
    }

    /// Label font size as it appears on screen.
    pub fn screen_font_size(&self) -> f64 {
        self.label.font_size / self.counter_scale
    }
}
