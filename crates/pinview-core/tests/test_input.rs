mod common;

use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use pinview_core::consts::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use pinview_core::{fit_display, InputEvent, Interaction, Point, Viewport};

use common::{half_size_viewport, sample_detections};

// ---------------------------------------------------------------------------
// Dragging
// ---------------------------------------------------------------------------

#[test]
fn test_drag_moves_offset_by_pointer_delta() {
    let mut vp = half_size_viewport();
    vp.start_drag(100.0, 100.0);
    vp.on_drag(150.0, 120.0);
    let t = vp.transform();
    assert_eq!((t.offset_x, t.offset_y), (50.0, 20.0));
}

#[test]
fn test_drag_is_linear_at_any_scale() {
    for &delta in &[0.3, 1.0, 4.0, 25.0] {
        let mut vp = half_size_viewport();
        vp.zoom(delta, 210.0, 390.0);
        let before = vp.transform();

        vp.start_drag(100.0, 100.0);
        vp.on_drag(150.0, 120.0);
        let after = vp.transform();

        assert_eq!(after.scale, before.scale);
        assert_relative_eq!(after.offset_x - before.offset_x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(after.offset_y - before.offset_y, 20.0, epsilon = 1e-9);
    }
}

#[test]
fn test_move_without_drag_is_ignored() {
    let mut vp = half_size_viewport();
    vp.on_drag(150.0, 120.0);
    assert_eq!(vp.transform().offset_x, 0.0);
}

#[test]
fn test_end_drag_is_idempotent() {
    let mut vp = half_size_viewport();
    vp.end_drag();
    vp.start_drag(1.0, 1.0);
    vp.end_drag();
    vp.end_drag();
    assert_eq!(vp.interaction(), Interaction::Idle);
}

// ---------------------------------------------------------------------------
// Event dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_pointer_sequence() {
    let mut vp = half_size_viewport();
    vp.handle_input(&InputEvent::PointerDown { x: 10.0, y: 10.0 });
    assert!(vp.is_dragging());
    vp.handle_input(&InputEvent::PointerMove { x: 30.0, y: 5.0 });
    vp.handle_input(&InputEvent::PointerUp);
    assert!(!vp.is_dragging());
    vp.handle_input(&InputEvent::PointerMove { x: 300.0, y: 300.0 });

    let t = vp.transform();
    assert_eq!((t.offset_x, t.offset_y), (20.0, -5.0));
}

#[test]
fn test_leave_ends_drag() {
    let mut vp = half_size_viewport();
    vp.handle_input(&InputEvent::PointerDown { x: 10.0, y: 10.0 });
    vp.handle_input(&InputEvent::PointerLeave);
    assert!(!vp.is_dragging());
}

#[test]
fn test_touch_uses_first_point() {
    let mut vp = half_size_viewport();
    vp.handle_input(&InputEvent::TouchStart {
        touches: vec![Point::new(50.0, 50.0), Point::new(400.0, 400.0)],
    });
    vp.handle_input(&InputEvent::TouchMove {
        touches: vec![Point::new(60.0, 80.0)],
    });
    vp.handle_input(&InputEvent::TouchEnd);

    assert!(!vp.is_dragging());
    let t = vp.transform();
    assert_eq!((t.offset_x, t.offset_y), (10.0, 30.0));
}

#[test]
fn test_empty_touch_start_does_not_drag() {
    let mut vp = half_size_viewport();
    vp.handle_input(&InputEvent::TouchStart { touches: vec![] });
    assert!(!vp.is_dragging());
}

#[test]
fn test_wheel_direction_selects_factor() {
    let mut vp = half_size_viewport();
    vp.handle_input(&InputEvent::Wheel { delta_y: -120.0, x: 300.0, y: 300.0 });
    assert_relative_eq!(vp.scale(), WHEEL_ZOOM_IN);

    vp.reset_view();
    vp.handle_input(&InputEvent::Wheel { delta_y: 3.0, x: 300.0, y: 300.0 });
    assert_relative_eq!(vp.scale(), WHEEL_ZOOM_OUT);

    vp.reset_view();
    vp.handle_input(&InputEvent::Wheel { delta_y: 0.0, x: 300.0, y: 300.0 });
    assert_eq!(vp.scale(), 1.0);
}

// ---------------------------------------------------------------------------
// Redraw coalescing
// ---------------------------------------------------------------------------

#[test]
fn test_take_render_frame_coalesces_updates() {
    let mut vp = half_size_viewport();
    vp.add_annotations(sample_detections().iter());
    assert!(vp.take_render_frame().is_some());
    assert!(vp.take_render_frame().is_none());

    for i in 0..10 {
        vp.zoom(1.1, 100.0 + i as f64, 200.0);
    }
    let frame = vp.take_render_frame().unwrap();
    assert_relative_eq!(frame.transform.scale, 1.1f64.powi(10), epsilon = 1e-9);
    assert_eq!(frame.annotations.len(), 3);
    assert!(!vp.needs_redraw());
}

#[test]
fn test_hidden_annotations_are_not_rendered() {
    let mut vp = half_size_viewport();
    vp.add_annotations(sample_detections().iter());
    vp.set_annotation_visible(2, false);
    let indices: Vec<usize> = vp.render_frame().annotations.iter().map(|a| a.index).collect();
    assert_eq!(indices, vec![0, 1]);
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_callback_runs_after_layout() {
    let mut vp = half_size_viewport();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    vp.set_resize_callback(move |vp: &mut Viewport| {
        seen.set(seen.get() + 1);
        assert_eq!(vp.container().width, 1000.0);
    });

    vp.update_container_size(1000.0, 800.0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_resize_callback_may_drive_viewport() {
    let mut vp = Viewport::default();
    vp.set_natural_size(1000, 1000);
    vp.set_resize_callback(fit_display);
    vp.add_annotations(sample_detections().iter());

    vp.update_container_size(800.0, 600.0);
    assert_eq!(vp.image_frame().display_width, 600.0);
    assert!(vp.annotations().all(|a| a.laid_out));

    vp.update_container_size(400.0, 600.0);
    assert_eq!(vp.image_frame().display_width, 400.0);
    let r = vp.annotation(0).unwrap().screen_rect;
    assert_relative_eq!(r.width, 50.0 * 0.4, epsilon = 1e-9);
}

#[test]
fn test_cleared_callback_is_not_called() {
    let mut vp = half_size_viewport();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    vp.set_resize_callback(move |_: &mut Viewport| seen.set(seen.get() + 1));
    vp.clear_resize_callback();
    vp.update_container_size(700.0, 700.0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_callback_may_clear_itself() {
    let mut vp = half_size_viewport();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    vp.set_resize_callback(move |vp: &mut Viewport| {
        seen.set(seen.get() + 1);
        vp.clear_resize_callback();
    });

    vp.update_container_size(700.0, 700.0);
    vp.update_container_size(800.0, 800.0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_callback_may_replace_itself() {
    let mut vp = half_size_viewport();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let (seen_first, seen_second) = (Rc::clone(&first), Rc::clone(&second));
    vp.set_resize_callback(move |vp: &mut Viewport| {
        seen_first.set(seen_first.get() + 1);
        let seen_second = Rc::clone(&seen_second);
        vp.set_resize_callback(move |_: &mut Viewport| seen_second.set(seen_second.get() + 1));
    });

    vp.update_container_size(700.0, 700.0);
    vp.update_container_size(800.0, 800.0);
    vp.update_container_size(900.0, 900.0);
    assert_eq!((first.get(), second.get()), (1, 2));
}
