use serde::Serialize;

use crate::annotation::AnnotationElement;
use crate::geometry::{ContainerFrame, Rect};
use crate::transform::ViewTransform;

use super::Viewport;

/// Everything a host needs to paint one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    pub transform: ViewTransform,
    pub container: ContainerFrame,
    /// Screen rectangle of the image layer, once the viewport is laid out.
    pub image_rect: Option<Rect>,
    /// Visible, placed annotations in draw order.
    pub annotations: Vec<AnnotationElement>,
}

impl Viewport {
    /// Whether anything changed since the last [`Viewport::take_render_frame`].
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Snapshot of the current state, regardless of the dirty flag.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            transform: self.transform,
            container: self.container,
            image_rect: self.image_rect(),
            annotations: self
                .annotations
                .values()
                .filter(|a| a.visible && a.laid_out)
                .cloned()
                .collect(),
        }
    }

    /// Snapshot for the next redraw, or `None` if nothing changed since the
    /// previous call. Calling this once per display frame coalesces any
    /// number of intermediate updates into a single redraw.
    pub fn take_render_frame(&mut self) -> Option<RenderFrame> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.render_frame())
    }
}
