use tracing::debug;

use crate::input::InputEvent;

use super::Viewport;

impl Viewport {
    /// Dispatch one host input event. Every path that can start a drag has a
    /// matching path that ends it (up, leave, touch end).
    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.start_drag(*x, *y),
            InputEvent::PointerMove { x, y } => self.on_drag(*x, *y),
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.end_drag()
            }
            InputEvent::TouchStart { touches } => match touches.first() {
                Some(p) => self.start_drag(p.x, p.y),
                None => debug!("Touch start without touch points"),
            },
            InputEvent::TouchMove { touches } => {
                if let Some(p) = touches.first() {
                    self.on_drag(p.x, p.y);
                }
            }
            InputEvent::Wheel { delta_y, x, y } => {
                if *delta_y == 0.0 {
                    return;
                }
                let delta = if *delta_y > 0.0 {
                    self.config.wheel_zoom_out
                } else {
                    self.config.wheel_zoom_in
                };
                self.zoom(delta, *x, *y);
            }
        }
    }
}
