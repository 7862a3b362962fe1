use pinview_core::{fit_display, RenderFrame, Session, Viewport, ViewportConfig};

/// Viewport display state: the texture plus the core viewport and session
/// that position it.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub viewport: Viewport,
    pub session: Session,
    /// Last snapshot taken from the viewport; repainted until it changes.
    pub frame: Option<RenderFrame>,
    /// Panel size most recently pushed to the viewport.
    pub container_size: Option<egui::Vec2>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            viewport: new_viewport(ViewportConfig::default()),
            session: Session::default(),
            frame: None,
            container_size: None,
        }
    }
}

impl ViewportState {
    /// Swap in a viewport built from `config`, keeping the container size and
    /// re-pushing the current image and overlay.
    pub fn apply_config(&mut self, config: ViewportConfig) {
        let container = self.viewport.container();
        self.viewport = new_viewport(config);
        self.viewport.update_container_size(container.width, container.height);
        self.session.show_current(&mut self.viewport);
    }

    /// Pull a new render snapshot if anything changed since the last one.
    pub fn sync_frame(&mut self) {
        if let Some(frame) = self.viewport.take_render_frame() {
            self.frame = Some(frame);
        }
    }

    pub fn zoom_percent(&self) -> f64 {
        self.viewport.scale() * 100.0
    }
}

/// The image is laid out contain-fit, so every container resize re-derives
/// the display size.
fn new_viewport(config: ViewportConfig) -> Viewport {
    let mut viewport = Viewport::new(config);
    viewport.set_resize_callback(fit_display);
    viewport
}
