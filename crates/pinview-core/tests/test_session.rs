mod common;

use approx::assert_relative_eq;
use pinview_core::consts::DEFAULT_DETECTION_LIMIT;
use pinview_core::{ImageFrame, Session, ViewTransform, Viewport};

use common::sample_detections;

fn session_with_image() -> (Session, Viewport, usize) {
    let mut session = Session::default();
    let mut vp = Viewport::default();
    vp.update_container_size(800.0, 600.0);
    let id = session.add_image("street.jpg", 1000, 1000);
    assert!(session.select_image(id, &mut vp));
    (session, vp, id)
}

#[test]
fn test_select_lays_out_image() {
    let (session, vp, id) = session_with_image();
    assert_eq!(session.current(), Some(id));
    assert_eq!(vp.image_frame().natural_width, 1000);
    assert_eq!(vp.image_frame().display_width, 600.0);
    assert!(vp.image_rect().is_some());
}

#[test]
fn test_results_filtered_by_threshold_keep_indices() {
    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);

    let keys: Vec<usize> = vp.annotations().map(|a| a.index).collect();
    assert_eq!(keys, vec![0, 2]);

    session.set_detection_limit(0.2, &mut vp);
    assert_eq!(vp.annotation_count(), 3);

    session.set_detection_limit(0.95, &mut vp);
    assert_eq!(vp.annotation_count(), 0);
}

#[test]
fn test_reselecting_current_image_is_noop() {
    let (mut session, mut vp, id) = session_with_image();
    vp.zoom(2.0, 10.0, 10.0);
    assert!(!session.select_image(id, &mut vp));
    assert_relative_eq!(vp.scale(), 2.0);
}

#[test]
fn test_switching_image_resets_view_and_overlay() {
    let (mut session, mut vp, first) = session_with_image();
    session.apply_results(first, sample_detections(), &mut vp);
    vp.zoom(3.0, 100.0, 100.0);

    let second = session.add_image("field.jpg", 2000, 1000);
    assert!(session.select_image(second, &mut vp));
    assert_eq!(vp.transform(), ViewTransform::identity());
    assert_eq!(vp.annotation_count(), 0);
    assert_eq!(vp.image_frame().display_width, 800.0);
    assert_eq!(vp.image_frame().display_height, 400.0);

    assert!(session.select_image(first, &mut vp));
    assert_eq!(vp.annotation_count(), 2);
}

#[test]
fn test_results_for_background_image_do_not_touch_overlay() {
    let (mut session, mut vp, _) = session_with_image();
    let other = session.add_image("other.jpg", 640, 480);
    session.apply_results(other, sample_detections(), &mut vp);
    assert!(session.is_analyzed(other));
    assert_eq!(vp.annotation_count(), 0);
}

#[test]
fn test_unknown_image_is_rejected() {
    let (mut session, mut vp, id) = session_with_image();
    assert!(!session.select_image(99, &mut vp));
    assert_eq!(session.current(), Some(id));
}

#[test]
fn test_verified_counts_span_images() {
    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);
    let other = session.add_image("other.jpg", 640, 480);
    session.apply_results(other, sample_detections(), &mut vp);

    assert!(session.set_verified(2, true));
    assert!(!session.set_verified(17, true));
    assert_eq!(session.verified_counts(), (1, 6));
}

#[test]
fn test_detection_limit_is_clamped() {
    let session = Session::new(1.7);
    assert_eq!(session.detection_limit(), 1.0);
}

#[test]
fn test_show_current_rebuilds_fresh_viewport() {
    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);

    let mut fresh = Viewport::default();
    fresh.update_container_size(800.0, 600.0);
    session.show_current(&mut fresh);
    assert_eq!(fresh.image_frame(), vp.image_frame());
    assert_eq!(fresh.annotation_count(), 2);
}

#[test]
fn test_non_finite_limit_uses_default() {
    assert_eq!(Session::new(f64::NAN).detection_limit(), DEFAULT_DETECTION_LIMIT);

    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);
    session.set_detection_limit(f64::NAN, &mut vp);
    assert_eq!(session.detection_limit(), DEFAULT_DETECTION_LIMIT);
    assert_eq!(vp.annotation_count(), 2);
}

#[test]
fn test_empty_image_clears_viewport() {
    let (mut session, mut vp, first) = session_with_image();
    session.apply_results(first, sample_detections(), &mut vp);
    vp.zoom(2.0, 100.0, 100.0);

    let empty = session.add_image("broken.jpg", 0, 0);
    assert!(session.select_image(empty, &mut vp));
    session.apply_results(empty, sample_detections(), &mut vp);

    assert_eq!(vp.image_frame(), ImageFrame::default());
    assert!(vp.image_rect().is_none());
    assert_eq!(vp.transform(), ViewTransform::identity());
    assert!(vp.annotations().all(|a| !a.laid_out));
    assert!(vp.image_to_container(10.0, 10.0, 5.0, 5.0).is_none());
}

#[test]
fn test_hidden_detections_survive_threshold_change() {
    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);

    assert!(session.set_annotation_visible(2, false, &mut vp));
    assert!(!vp.annotation(2).unwrap().visible);

    session.set_detection_limit(0.2, &mut vp);
    assert_eq!(vp.annotation_count(), 3);
    assert!(!vp.annotation(2).unwrap().visible);
    assert!(vp.annotation(1).unwrap().visible);

    // Hidden while filtered out, still hidden when it comes back.
    session.set_detection_limit(0.5, &mut vp);
    assert!(session.set_annotation_visible(1, false, &mut vp));
    session.set_detection_limit(0.2, &mut vp);
    assert!(!vp.annotation(1).unwrap().visible);

    assert!(session.set_annotation_visible(2, true, &mut vp));
    session.set_detection_limit(0.1, &mut vp);
    assert!(vp.annotation(2).unwrap().visible);
    assert!(!session.set_annotation_visible(17, false, &mut vp));
}

#[test]
fn test_new_results_reset_hidden_detections() {
    let (mut session, mut vp, id) = session_with_image();
    session.apply_results(id, sample_detections(), &mut vp);
    session.set_annotation_visible(0, false, &mut vp);

    session.apply_results(id, sample_detections(), &mut vp);
    assert!(!session.is_hidden(id, 0));
    assert!(vp.annotation(0).unwrap().visible);
}
