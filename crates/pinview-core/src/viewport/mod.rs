//! Pan/zoom viewport with a detection overlay pinned to image content.
//!
//! Three mappings compose into the image-to-screen projection:
//! natural pixels -> display pixels (layout ratio), display pixels -> image
//! layer (centered in the container, scaled about its center) and the
//! [`ViewTransform`] pan/zoom. All annotation geometry is re-derived from
//! that projection whenever any of its inputs change.

mod input;
mod projection;
mod render;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::annotation::{AnnotationElement, OverlayStyle};
use crate::config::ViewportConfig;
use crate::detection::Detection;
use crate::error::{Result, ViewportError};
use crate::geometry::{ContainerFrame, ImageFrame, Point, Rect};
use crate::input::Interaction;
use crate::transform::{ScaleBounds, ViewTransform};

use projection::Projection;
pub use render::RenderFrame;

/// Hook run after the container is resized. It receives the viewport itself,
/// so it may query or drive it re-entrantly.
pub type ResizeCallback = Box<dyn FnMut(&mut Viewport)>;

pub struct Viewport {
    config: ViewportConfig,
    bounds: ScaleBounds,
    style: OverlayStyle,
    transform: ViewTransform,
    image: ImageFrame,
    container: ContainerFrame,
    interaction: Interaction,
    annotations: BTreeMap<usize, AnnotationElement>,
    resize_callback: Option<ResizeCallback>,
    /// Bumped on every set/clear so a running callback can tell whether it
    /// was replaced or removed while it ran.
    callback_generation: u64,
    dirty: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("transform", &self.transform)
            .field("image", &self.image)
            .field("container", &self.container)
            .field("interaction", &self.interaction)
            .field("annotations", &self.annotations.len())
            .field("has_resize_callback", &self.resize_callback.is_some())
            .finish()
    }
}

impl Viewport {
    /// Build a viewport from `config`. A config that fails validation is
    /// replaced by the defaults.
    pub fn new(config: ViewportConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "Rejected viewport config, using defaults");
                ViewportConfig::default()
            }
        };
        Self {
            bounds: config.scale_bounds(),
            style: config.overlay_style(),
            config,
            transform: ViewTransform::identity(),
            image: ImageFrame::default(),
            container: ContainerFrame::default(),
            interaction: Interaction::Idle,
            annotations: BTreeMap::new(),
            resize_callback: None,
            callback_generation: 0,
            dirty: true,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn image_frame(&self) -> ImageFrame {
        self.image
    }

    pub fn container(&self) -> ContainerFrame {
        self.container
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Record the intrinsic pixel size of a freshly loaded image.
    pub fn set_natural_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            warn!(
                error = %ViewportError::InvalidDimensions { width, height },
                "Ignoring natural size"
            );
            return;
        }
        self.image.natural_width = width;
        self.image.natural_height = height;
        debug!(width, height, "Natural size set");
        self.update_transform();
    }

    /// Record the as-rendered image size at scale 1, read back from the
    /// rendering surface after layout.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "Ignoring non-positive display size");
            return;
        }
        self.image.display_width = width;
        self.image.display_height = height;
        debug!(width, height, "Display size set");
        self.update_transform();
    }

    /// Forget the current image. Mapping queries return `None` until new
    /// sizes are set.
    pub fn clear_image(&mut self) {
        self.image = ImageFrame::default();
        debug!("Image cleared");
        self.update_transform();
    }

    /// Record a new container size, re-lay out the overlay and run the
    /// registered resize callback.
    pub fn update_container_size(&mut self, width: f64, height: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.container = ContainerFrame::new(width, height);
        debug!(width, height, "Container resized");
        self.update_transform();

        let generation = self.callback_generation;
        if let Some(mut callback) = self.resize_callback.take() {
            callback(self);
            // Only put it back if the callback left its registration alone.
            if self.callback_generation == generation {
                self.resize_callback = Some(callback);
            }
        }
    }

    pub fn set_resize_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Viewport) + 'static,
    {
        self.resize_callback = Some(Box::new(callback));
        self.callback_generation = self.callback_generation.wrapping_add(1);
    }

    pub fn clear_resize_callback(&mut self) {
        self.resize_callback = None;
        self.callback_generation = self.callback_generation.wrapping_add(1);
    }

    // -----------------------------------------------------------------------
    // Mapping
    // -----------------------------------------------------------------------

    fn projection(&self) -> Result<Projection> {
        Projection::new(&self.image, &self.container, &self.transform)
    }

    /// Map an image-space rectangle (natural pixels) to container pixels.
    ///
    /// Returns `None` until a natural size, display size and non-empty
    /// container are known.
    pub fn image_to_container(&self, px: f64, py: f64, width: f64, height: f64) -> Option<Rect> {
        match self.projection() {
            Ok(p) => Some(p.map_rect(Rect::new(px, py, width, height))),
            Err(e) => {
                warn!(error = %e, "image_to_container called before the viewport is laid out");
                None
            }
        }
    }

    /// Map a container point back to natural-image pixels.
    pub fn container_to_image(&self, x: f64, y: f64) -> Option<Point> {
        match self.projection() {
            Ok(p) => Some(p.unmap_point(Point::new(x, y))),
            Err(e) => {
                warn!(error = %e, "container_to_image called before the viewport is laid out");
                None
            }
        }
    }

    /// Screen rectangle covered by the whole image layer.
    pub fn image_rect(&self) -> Option<Rect> {
        let p = self.projection().ok()?;
        Some(p.map_rect(Rect::new(
            0.0,
            0.0,
            self.image.natural_width as f64,
            self.image.natural_height as f64,
        )))
    }

    // -----------------------------------------------------------------------
    // Pan / zoom
    // -----------------------------------------------------------------------

    /// Scale by `delta` around a container-space pivot, keeping the image
    /// content under the pivot in place.
    pub fn zoom(&mut self, delta: f64, pivot_x: f64, pivot_y: f64) {
        if !(pivot_x.is_finite() && pivot_y.is_finite()) {
            warn!(pivot_x, pivot_y, "Ignoring zoom with non-finite pivot");
            return;
        }
        // The image layer scales about its center, which sits at the
        // container center; express the pivot in that frame.
        let origin = self.container.center();
        let pivot = Point::new(pivot_x - origin.x, pivot_y - origin.y);
        if self.transform.zoom_at(delta, pivot, self.bounds) {
            self.update_transform();
        }
    }

    pub fn start_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        if !(pointer_x.is_finite() && pointer_y.is_finite()) {
            warn!(pointer_x, pointer_y, "Ignoring drag start at non-finite pointer");
            return;
        }
        let anchor = Point::new(
            pointer_x - self.transform.offset_x,
            pointer_y - self.transform.offset_y,
        );
        self.interaction = Interaction::Dragging { anchor };
        debug!(x = pointer_x, y = pointer_y, "Drag started");
    }

    /// Follow the pointer while dragging; ignored when idle.
    pub fn on_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        let Interaction::Dragging { anchor } = self.interaction else {
            return;
        };
        if !(pointer_x.is_finite() && pointer_y.is_finite()) {
            return;
        }
        self.transform
            .pan_to(pointer_x - anchor.x, pointer_y - anchor.y);
        self.update_transform();
    }

    pub fn end_drag(&mut self) {
        if self.interaction.is_dragging() {
            debug!("Drag ended");
        }
        self.interaction = Interaction::Idle;
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
        self.update_transform();
    }

    /// Frame an image-space box: it ends up centered, spanning about two
    /// thirds of the limiting container dimension.
    pub fn focus_on_bbox(&mut self, bbox: [f64; 4]) {
        if let Err(e) = self.try_focus_on_bbox(bbox) {
            warn!(error = %e, ?bbox, "Cannot focus on box");
        }
    }

    fn try_focus_on_bbox(&mut self, bbox: [f64; 4]) -> Result<()> {
        if bbox.iter().any(|v| !v.is_finite()) {
            return Err(ViewportError::NonFinite { what: "bounding box" });
        }
        let (rx, ry) = self.image.ratios()?;
        self.container.ensure_area()?;
        let [x, y, w, h] = bbox;

        let padding = self.config.focus_padding;
        let fit_x = self.container.width / (w * rx * padding).abs();
        let fit_y = self.container.height / (h * ry * padding).abs();
        let scale = self.bounds.clamp(fit_x.min(fit_y));

        // Solve offset so the box center lands on the container center:
        // (c - D/2) * scale + offset = 0 in the layer frame.
        let cx = (x + w / 2.0) * rx;
        let cy = (y + h / 2.0) * ry;
        self.transform = ViewTransform {
            scale,
            offset_x: (self.image.display_width / 2.0 - cx) * scale,
            offset_y: (self.image.display_height / 2.0 - cy) * scale,
        };
        debug!(scale, ?bbox, "Focused on box");
        self.update_transform();
        Ok(())
    }

    /// Focus the box of an existing annotation. Stale keys are ignored.
    pub fn focus_on_annotation(&mut self, index: usize) -> bool {
        let Some(bbox) = self.annotations.get(&index).map(|a| a.bbox) else {
            debug!(index, "focus_on_annotation: no such annotation");
            return false;
        };
        self.focus_on_bbox([bbox.x, bbox.y, bbox.width, bbox.height]);
        true
    }

    /// Re-derive the screen geometry and counter-scaled sizes of every
    /// annotation from the current projection.
    pub fn update_transform(&mut self) {
        self.dirty = true;
        let projection = match self.projection() {
            Ok(p) => p,
            Err(e) => {
                debug!(reason = %e, "Skipping overlay layout");
                return;
            }
        };
        let scale = self.transform.scale;
        for element in self.annotations.values_mut() {
            element.relayout(projection.map_rect(element.bbox), scale, &self.style);
        }
    }

    // -----------------------------------------------------------------------
    // Annotations
    // -----------------------------------------------------------------------

    /// Create the overlay for `detection`, keyed by its index. An existing
    /// overlay with the same key is replaced. Before the viewport is laid out
    /// the element is kept but left unplaced until the next layout pass.
    pub fn add_annotation(&mut self, detection: &Detection) {
        let mut element = AnnotationElement::new(detection);
        match self.projection() {
            Ok(p) => element.relayout(p.map_rect(element.bbox), self.transform.scale, &self.style),
            Err(e) => warn!(error = %e, index = detection.index, "Annotation added before layout"),
        }
        self.annotations.insert(detection.index, element);
        self.dirty = true;
    }

    pub fn add_annotations<'a, I>(&mut self, detections: I)
    where
        I: IntoIterator<Item = &'a Detection>,
    {
        for detection in detections {
            self.add_annotation(detection);
        }
    }

    /// Remove every overlay element. The view transform is kept.
    pub fn clear_annotations(&mut self) {
        if !self.annotations.is_empty() {
            self.annotations.clear();
            self.dirty = true;
        }
    }

    pub fn remove_annotation(&mut self, index: usize) -> Option<AnnotationElement> {
        let removed = self.annotations.remove(&index);
        if removed.is_some() {
            self.dirty = true;
        } else {
            debug!(index, "remove_annotation: no such annotation");
        }
        removed
    }

    /// Returns `false` if no annotation has this key.
    pub fn set_annotation_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.annotations.get_mut(&index) {
            Some(element) => {
                if element.visible != visible {
                    element.visible = visible;
                    self.dirty = true;
                }
                true
            }
            None => {
                debug!(index, "set_annotation_visible: no such annotation");
                false
            }
        }
    }

    /// Flip visibility; returns the new state, or `None` for a stale key.
    pub fn toggle_annotation(&mut self, index: usize) -> Option<bool> {
        let Some(element) = self.annotations.get_mut(&index) else {
            debug!(index, "toggle_annotation: no such annotation");
            return None;
        };
        element.visible = !element.visible;
        self.dirty = true;
        Some(element.visible)
    }

    pub fn annotation(&self, index: usize) -> Option<&AnnotationElement> {
        self.annotations.get(&index)
    }

    /// In ascending index order.
    pub fn annotations(&self) -> impl Iterator<Item = &AnnotationElement> {
        self.annotations.values()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Top-most visible annotation under a container point. Higher indices
    /// are drawn later and therefore win.
    pub fn annotation_at(&self, x: f64, y: f64) -> Option<usize> {
        let p = Point::new(x, y);
        self.annotations
            .values()
            .rev()
            .find(|a| a.visible && a.laid_out && a.screen_rect.contains(p))
            .map(|a| a.index)
    }
}
