use serde::Serialize;

use crate::error::{Result, ViewportError};

/// A 2D point. The coordinate space depends on context (image, display or screen).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from an `[x, y, w, h]` bbox array.
    pub fn from_xywh(bbox: [f64; 4]) -> Self {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on all edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Size of the loaded raster: intrinsic pixels and the as-rendered size at
/// scale 1 (before any pan/zoom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ImageFrame {
    pub natural_width: u32,
    pub natural_height: u32,
    pub display_width: f64,
    pub display_height: f64,
}

impl ImageFrame {
    pub fn has_natural_size(&self) -> bool {
        self.natural_width > 0 && self.natural_height > 0
    }

    pub fn has_display_size(&self) -> bool {
        self.display_width > 0.0 && self.display_height > 0.0
    }

    /// Displayed-to-natural size ratios `(rx, ry)`.
    pub fn ratios(&self) -> Result<(f64, f64)> {
        if !self.has_natural_size() {
            return Err(ViewportError::NaturalSizeUnset);
        }
        if !self.has_display_size() {
            return Err(ViewportError::DisplaySizeUnset);
        }
        Ok((
            self.display_width / self.natural_width as f64,
            self.display_height / self.natural_height as f64,
        ))
    }
}

/// The viewport's visible bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ContainerFrame {
    pub width: f64,
    pub height: f64,
}

impl ContainerFrame {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn ensure_area(&self) -> Result<()> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(ViewportError::EmptyContainer {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Size at which an image of `natural_width x natural_height` is laid out
/// inside `container`: aspect preserved, shrunk to fit, never upscaled.
///
/// Hosts without a layout engine use this to produce the display size the
/// viewport reads back after an image load.
pub fn contain_fit(natural_width: u32, natural_height: u32, container: ContainerFrame) -> (f64, f64) {
    if natural_width == 0 || natural_height == 0 {
        return (0.0, 0.0);
    }
    let nw = natural_width as f64;
    let nh = natural_height as f64;
    let fit = (container.width / nw)
        .min(container.height / nh)
        .clamp(0.0, 1.0);
    (nw * fit, nh * fit)
}
