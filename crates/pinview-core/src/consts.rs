/// Smallest allowed view scale.
pub const SCALE_MIN: f64 = 0.1;

/// Largest allowed view scale.
pub const SCALE_MAX: f64 = 80.0;

/// Zoom factor applied by one wheel notch towards the user (scroll up).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Zoom factor applied by one wheel notch away from the user (scroll down).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Focus framing padding: the focused box spans `1 / FOCUS_PADDING` of the
/// limiting container dimension (roughly two thirds).
pub const FOCUS_PADDING: f64 = 1.5;

/// Annotation border thickness in screen pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Annotation label font size in screen pixels.
pub const DEFAULT_LABEL_FONT_SIZE: f64 = 12.0;

/// Vertical gap between the bottom edge of a box and its label, in screen pixels.
pub const DEFAULT_LABEL_GAP: f64 = 4.0;

/// Confidence threshold below which detections are not shown.
pub const DEFAULT_DETECTION_LIMIT: f64 = 0.5;
