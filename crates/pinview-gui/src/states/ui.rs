use std::path::PathBuf;

use pinview_core::DetectionSet;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub image_path: Option<PathBuf>,
    pub detections_path: Option<PathBuf>,

    /// Detections that arrived before any image was shown.
    pub pending_detections: Option<DetectionSet>,

    /// Annotation picked in the viewport or side panel.
    pub selected: Option<usize>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
