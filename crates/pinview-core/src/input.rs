use crate::geometry::Point;

/// Host input, in container-relative pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Pointer left the container surface.
    PointerLeave,
    /// Only the first touch point is used.
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    /// `delta_y > 0` (scrolling down) zooms out, `< 0` zooms in.
    Wheel { delta_y: f64, x: f64, y: f64 },
}

/// Pointer interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// `anchor` is the pointer position minus the offset at drag start.
    Dragging { anchor: Point },
}

impl Interaction {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Interaction::Dragging { .. })
    }
}
