use crate::error::Result;
use crate::geometry::{ContainerFrame, ImageFrame, Point, Rect};
use crate::transform::ViewTransform;

/// Snapshot of the image-to-container mapping for one transform state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
    rx: f64,
    ry: f64,
    /// Top-left of the scaled image layer before panning.
    left0: f64,
    top0: f64,
    transform: ViewTransform,
}

impl Projection {
    pub(crate) fn new(
        image: &ImageFrame,
        container: &ContainerFrame,
        transform: &ViewTransform,
    ) -> Result<Self> {
        let (rx, ry) = image.ratios()?;
        container.ensure_area()?;
        let scale = transform.scale;
        Ok(Self {
            rx,
            ry,
            left0: (container.width - image.display_width * scale) / 2.0,
            top0: (container.height - image.display_height * scale) / 2.0,
            transform: *transform,
        })
    }

    pub(crate) fn map_rect(&self, r: Rect) -> Rect {
        let s = self.transform.scale;
        let xs = r.x * self.rx;
        let ys = r.y * self.ry;
        Rect::new(
            xs * s + self.transform.offset_x + self.left0,
            ys * s + self.transform.offset_y + self.top0,
            r.width * s * self.rx,
            r.height * s * self.ry,
        )
    }

    pub(crate) fn unmap_point(&self, p: Point) -> Point {
        let s = self.transform.scale;
        let xs = (p.x - self.transform.offset_x - self.left0) / s;
        let ys = (p.y - self.transform.offset_y - self.top0) / s;
        Point::new(xs / self.rx, ys / self.ry)
    }
}
