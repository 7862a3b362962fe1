use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{SCALE_MAX, SCALE_MIN};
use crate::geometry::Point;

/// Inclusive range the view scale is clamped to. Always finite, positive
/// and ordered; [`ScaleBounds::new`] repairs anything else.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleBounds {
    min: f64,
    max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            min: SCALE_MIN,
            max: SCALE_MAX,
        }
    }
}

impl ScaleBounds {
    /// Build bounds from untrusted values. Non-finite or non-positive bounds
    /// fall back to the defaults; an inverted pair is swapped.
    pub fn new(min: f64, max: f64) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(min) || !usable(max) {
            warn!(min, max, "Unusable scale bounds, using defaults");
            return Self::default();
        }
        if min > max {
            warn!(min, max, "Inverted scale bounds, swapping");
            return Self { min: max, max: min };
        }
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Pan/zoom state: `screen = point * scale + offset`.
///
/// Points fed to [`ViewTransform::apply`] are expressed relative to the
/// transform origin of the image layer; the viewport places that origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// Multiply the scale by `delta` while keeping the point under `pivot`
    /// stationary. The resulting scale is clamped to `bounds`.
    ///
    /// Returns `false` (and leaves the transform untouched) for a delta that
    /// is not a finite positive number.
    pub fn zoom_at(&mut self, delta: f64, pivot: Point, bounds: ScaleBounds) -> bool {
        if !delta.is_finite() || delta <= 0.0 {
            debug!(delta, "Ignoring non-positive zoom delta");
            return false;
        }

        let world = self.invert(pivot);
        let requested = self.scale * delta;
        let scale = bounds.clamp(requested);
        if scale != requested {
            debug!(requested, clamped = scale, "Zoom clamped");
        }

        self.scale = scale;
        self.offset_x = pivot.x - world.x * scale;
        self.offset_y = pivot.y - world.y * scale;
        true
    }

    pub fn pan_to(&mut self, offset_x: f64, offset_y: f64) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_invert_are_inverse() {
        let t = ViewTransform {
            scale: 2.5,
            offset_x: -40.0,
            offset_y: 12.0,
        };
        let p = Point::new(17.0, -3.0);
        let back = t.invert(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn scale_bounds_are_repaired() {
        let swapped = ScaleBounds::new(10.0, 1.0);
        assert_eq!((swapped.min(), swapped.max()), (1.0, 10.0));
        assert_eq!(ScaleBounds::new(f64::NAN, 4.0), ScaleBounds::default());
        assert_eq!(ScaleBounds::new(0.0, 4.0), ScaleBounds::default());
        assert_eq!(ScaleBounds::new(10.0, 1.0).clamp(50.0), 10.0);
    }

    #[test]
    fn zoom_rejects_bad_delta() {
        let mut t = ViewTransform::identity();
        assert!(!t.zoom_at(0.0, Point::new(1.0, 1.0), ScaleBounds::default()));
        assert!(!t.zoom_at(f64::NAN, Point::new(1.0, 1.0), ScaleBounds::default()));
        assert_eq!(t, ViewTransform::identity());
    }

    #[test]
    fn zoom_at_origin_keeps_offset() {
        let mut t = ViewTransform::identity();
        t.zoom_at(2.0, Point::new(0.0, 0.0), ScaleBounds::default());
        assert_eq!(t.scale, 2.0);
        assert_eq!((t.offset_x, t.offset_y), (0.0, 0.0));
    }
}
