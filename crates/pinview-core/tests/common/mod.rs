use pinview_core::{Detection, DetectionSet, Viewport};

/// Viewport with every frame known: natural `nw x nh`, displayed at
/// `dw x dh` inside a `cw x ch` container, identity view.
pub fn laid_out_viewport(nw: u32, nh: u32, dw: f64, dh: f64, cw: f64, ch: f64) -> Viewport {
    let mut vp = Viewport::default();
    vp.update_container_size(cw, ch);
    vp.set_natural_size(nw, nh);
    vp.set_display_size(dw, dh);
    vp
}

/// The 1000x1000 image shown at half size in a 600x600 container.
pub fn half_size_viewport() -> Viewport {
    laid_out_viewport(1000, 1000, 500.0, 500.0, 600.0, 600.0)
}

/// Three detections with mixed confidence; index 1 sits below the default
/// threshold.
pub fn sample_detections() -> DetectionSet {
    DetectionSet::new(vec![
        Detection::new("car", [10.0, 10.0, 50.0, 50.0], 0.92),
        Detection::new("person", [200.0, 300.0, 40.0, 120.0], 0.31),
        Detection::new("dog", [600.0, 500.0, 150.0, 100.0], 0.74),
    ])
}
