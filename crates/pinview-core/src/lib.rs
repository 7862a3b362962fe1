pub mod annotation;
pub mod config;
pub mod consts;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod input;
pub mod session;
pub mod transform;
pub mod viewport;

pub use annotation::{AnnotationElement, LabelBox, OverlayStyle};
pub use config::ViewportConfig;
pub use detection::{Detection, DetectionSet};
pub use error::{Result, ViewportError};
pub use geometry::{ContainerFrame, ImageFrame, Point, Rect};
pub use input::{InputEvent, Interaction};
pub use session::{fit_display, ImageEntry, Session};
pub use transform::{ScaleBounds, ViewTransform};
pub use viewport::{RenderFrame, Viewport};
