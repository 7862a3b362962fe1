//! Application state that feeds a [`Viewport`]: the loaded images, which one
//! is on screen, per-image detection results and the confidence threshold.
//! The viewport never reads any of this on its own; the session pushes it.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::consts::DEFAULT_DETECTION_LIMIT;
use crate::detection::DetectionSet;
use crate::geometry::contain_fit;
use crate::viewport::Viewport;

/// Lay the image out the way an `object-fit: contain` surface would and feed
/// the result back as the display size. Hosts without their own layout engine
/// call this from the resize callback.
pub fn fit_display(viewport: &mut Viewport) {
    let frame = viewport.image_frame();
    if !frame.has_natural_size() {
        return;
    }
    let (w, h) = contain_fit(frame.natural_width, frame.natural_height, viewport.container());
    if w > 0.0 && h > 0.0 && (w, h) != (frame.display_width, frame.display_height) {
        viewport.set_display_size(w, h);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageEntry {
    pub name: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

#[derive(Clone, Debug)]
pub struct Session {
    images: Vec<ImageEntry>,
    current: Option<usize>,
    results: HashMap<usize, DetectionSet>,
    /// Detection indices the user hid, per image. Survives overlay rebuilds.
    hidden: HashMap<usize, BTreeSet<usize>>,
    detection_limit: f64,
}

/// Non-finite limits fall back to the default; the rest are clamped to
/// `[0, 1]`.
fn sanitize_limit(limit: f64) -> f64 {
    if limit.is_finite() {
        limit.clamp(0.0, 1.0)
    } else {
        warn!(limit, "Non-finite detection limit, using default");
        DEFAULT_DETECTION_LIMIT
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTION_LIMIT)
    }
}

impl Session {
    pub fn new(detection_limit: f64) -> Self {
        Self {
            images: Vec::new(),
            current: None,
            results: HashMap::new(),
            hidden: HashMap::new(),
            detection_limit: sanitize_limit(detection_limit),
        }
    }

    /// Register an image; returns its id.
    pub fn add_image(&mut self, name: impl Into<String>, natural_width: u32, natural_height: u32) -> usize {
        self.images.push(ImageEntry {
            name: name.into(),
            natural_width,
            natural_height,
        });
        self.images.len() - 1
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_image(&self) -> Option<&ImageEntry> {
        self.current.and_then(|i| self.images.get(i))
    }

    pub fn detection_limit(&self) -> f64 {
        self.detection_limit
    }

    pub fn is_analyzed(&self, image: usize) -> bool {
        self.results.contains_key(&image)
    }

    pub fn detections(&self, image: usize) -> Option<&DetectionSet> {
        self.results.get(&image)
    }

    pub fn current_detections(&self) -> Option<&DetectionSet> {
        self.current.and_then(|i| self.results.get(&i))
    }

    /// Put `image` on screen. Re-selecting the current image is a no-op and
    /// returns `false`, as is an unknown id.
    pub fn select_image(&mut self, image: usize, viewport: &mut Viewport) -> bool {
        if self.current == Some(image) {
            return false;
        }
        let Some(entry) = self.images.get(image) else {
            debug!(image, "select_image: no such image");
            return false;
        };
        info!(image, name = %entry.name, "Image selected");
        self.current = Some(image);
        self.show_current(viewport);
        true
    }

    /// Push the current image into `viewport` from scratch: sizes, identity
    /// view and overlay. Used after switching images or swapping in a freshly
    /// configured viewport. An image without pixels leaves the viewport empty.
    pub fn show_current(&self, viewport: &mut Viewport) {
        let Some(entry) = self.current_image() else {
            return;
        };
        if entry.natural_width == 0 || entry.natural_height == 0 {
            warn!(
                name = %entry.name,
                width = entry.natural_width,
                height = entry.natural_height,
                "Image has no pixels, clearing viewport"
            );
            viewport.clear_image();
            viewport.clear_annotations();
            viewport.reset_view();
            return;
        }
        viewport.set_natural_size(entry.natural_width, entry.natural_height);
        fit_display(viewport);
        viewport.reset_view();
        self.refresh(viewport);
    }

    /// Store the results of an analysis run for `image`, dropping any
    /// visibility choices made on the previous run. If it is on screen the
    /// overlay is rebuilt.
    pub fn apply_results(&mut self, image: usize, set: DetectionSet, viewport: &mut Viewport) {
        info!(image, count = set.len(), "Detection results applied");
        self.results.insert(image, set);
        self.hidden.remove(&image);
        if self.current == Some(image) {
            self.refresh(viewport);
        }
    }

    /// Rebuild the overlay for the current image: clear, then add every
    /// detection that reaches the threshold. Indices are preserved, so
    /// filtered-out detections leave gaps in the key space. Detections the
    /// user hid stay hidden.
    pub fn refresh(&self, viewport: &mut Viewport) {
        viewport.clear_annotations();
        let Some(image) = self.current else {
            return;
        };
        let Some(set) = self.results.get(&image) else {
            return;
        };
        viewport.add_annotations(set.above(self.detection_limit));
        for &index in self.hidden.get(&image).into_iter().flatten() {
            viewport.set_annotation_visible(index, false);
        }
    }

    pub fn set_detection_limit(&mut self, limit: f64, viewport: &mut Viewport) {
        self.detection_limit = sanitize_limit(limit);
        self.refresh(viewport);
    }

    /// Show or hide a detection of the current image. The choice is kept
    /// across threshold changes and image switches, and applies even while
    /// the detection is filtered out. Returns `false` without a current
    /// image or for an index the results don't have.
    pub fn set_annotation_visible(&mut self, index: usize, visible: bool, viewport: &mut Viewport) -> bool {
        let Some(image) = self.current else {
            return false;
        };
        if !self.results.get(&image).is_some_and(|set| index < set.len()) {
            debug!(image, index, "set_annotation_visible: no such detection");
            return false;
        }
        let hidden = self.hidden.entry(image).or_default();
        if visible {
            hidden.remove(&index);
        } else {
            hidden.insert(index);
        }
        viewport.set_annotation_visible(index, visible);
        true
    }

    /// Whether the user hid detection `index` of `image`.
    pub fn is_hidden(&self, image: usize, index: usize) -> bool {
        self.hidden.get(&image).is_some_and(|h| h.contains(&index))
    }

    /// Flag a detection of the current image as checked by the user.
    pub fn set_verified(&mut self, index: usize, verified: bool) -> bool {
        let Some(image) = self.current else {
            return false;
        };
        self.results
            .get_mut(&image)
            .is_some_and(|set| set.set_verified(index, verified))
    }

    /// `(verified, total)` over all analysed images.
    pub fn verified_counts(&self) -> (usize, usize) {
        self.results
            .values()
            .map(DetectionSet::verified_counts)
            .fold((0, 0), |(v, t), (sv, st)| (v + sv, t + st))
    }
}
