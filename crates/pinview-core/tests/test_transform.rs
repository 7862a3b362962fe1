mod common;

use approx::assert_relative_eq;
use pinview_core::consts::{SCALE_MAX, SCALE_MIN};
use pinview_core::ViewTransform;

use common::half_size_viewport;

// ---------------------------------------------------------------------------
// Zoom pivot
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_keeps_content_under_pivot() {
    let pivots = [(300.0, 300.0), (0.0, 0.0), (580.0, 40.0), (123.5, 456.25)];
    for &(px, py) in &pivots {
        for &delta in &[1.1, 0.9, 2.0, 0.25] {
            let mut vp = half_size_viewport();
            vp.zoom(1.7, 90.0, 510.0);
            let before = vp.container_to_image(px, py).unwrap();
            vp.zoom(delta, px, py);
            let after = vp.container_to_image(px, py).unwrap();
            assert_relative_eq!(before.x, after.x, epsilon = 1e-6);
            assert_relative_eq!(before.y, after.y, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_zoom_at_container_center_keeps_offset_zero() {
    let mut vp = half_size_viewport();
    vp.zoom(2.0, 300.0, 300.0);
    let t = vp.transform();
    assert_relative_eq!(t.scale, 2.0);
    assert_relative_eq!(t.offset_x, 0.0);
    assert_relative_eq!(t.offset_y, 0.0);
}

#[test]
fn test_overlay_stays_pinned_through_zoom() {
    let mut vp = half_size_viewport();
    vp.add_annotations(common::sample_detections().iter());
    vp.zoom(4.0, 200.0, 150.0);
    vp.zoom(0.9, 410.0, 77.0);

    for el in vp.annotations() {
        let expected = vp
            .image_to_container(el.bbox.x, el.bbox.y, el.bbox.width, el.bbox.height)
            .unwrap();
        assert_relative_eq!(el.screen_rect.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(el.screen_rect.y, expected.y, epsilon = 1e-9);
        assert_relative_eq!(el.screen_rect.width, expected.width, epsilon = 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_scale_clamped_to_max() {
    let mut vp = half_size_viewport();
    for _ in 0..200 {
        vp.zoom(1.1, 250.0, 250.0);
    }
    assert_eq!(vp.scale(), SCALE_MAX);
}

#[test]
fn test_scale_clamped_to_min() {
    let mut vp = half_size_viewport();
    for _ in 0..200 {
        vp.zoom(0.9, 250.0, 250.0);
    }
    assert_eq!(vp.scale(), SCALE_MIN);
}

#[test]
fn test_zoom_at_bound_is_idempotent() {
    let mut vp = half_size_viewport();
    vp.zoom(1000.0, 120.0, 480.0);
    let at_max = vp.transform();
    vp.zoom(1.1, 120.0, 480.0);
    let again = vp.transform();
    assert_eq!(again.scale, at_max.scale);
    assert_relative_eq!(again.offset_x, at_max.offset_x, epsilon = 1e-9);
    assert_relative_eq!(again.offset_y, at_max.offset_y, epsilon = 1e-9);
}

#[test]
fn test_invalid_delta_is_ignored() {
    let mut vp = half_size_viewport();
    vp.zoom(-2.0, 10.0, 10.0);
    vp.zoom(0.0, 10.0, 10.0);
    vp.zoom(f64::INFINITY, 10.0, 10.0);
    assert_eq!(vp.transform(), ViewTransform::identity());
}

#[test]
fn test_non_finite_pivot_is_ignored() {
    let mut vp = half_size_viewport();
    vp.zoom(2.0, 100.0, 100.0);
    let before = vp.transform();

    vp.zoom(2.0, f64::NAN, 100.0);
    vp.zoom(2.0, 100.0, f64::NEG_INFINITY);
    assert_eq!(vp.transform(), before);

    vp.start_drag(f64::NAN, 0.0);
    assert!(!vp.is_dragging());
    vp.start_drag(0.0, 0.0);
    vp.on_drag(f64::NAN, 5.0);
    assert_eq!(vp.transform(), before);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[test]
fn test_reset_restores_identity() {
    let mut vp = half_size_viewport();
    vp.zoom(3.0, 17.0, 500.0);
    vp.start_drag(10.0, 10.0);
    vp.on_drag(90.0, -40.0);
    vp.end_drag();

    vp.reset_view();
    assert_eq!(vp.transform(), ViewTransform::identity());
    assert_eq!(vp.transform().scale, 1.0);
    assert_eq!((vp.transform().offset_x, vp.transform().offset_y), (0.0, 0.0));
}
