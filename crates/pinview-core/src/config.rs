use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annotation::OverlayStyle;
use crate::consts::{
    DEFAULT_LABEL_FONT_SIZE, DEFAULT_LABEL_GAP, DEFAULT_STROKE_WIDTH, FOCUS_PADDING, SCALE_MAX,
    SCALE_MIN, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};
use crate::error::{Result, ViewportError};
use crate::transform::ScaleBounds;

/// Tunables for a [`crate::Viewport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_scale_min")]
    pub scale_min: f64,
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,
    /// Zoom factor per wheel notch scrolled up.
    #[serde(default = "default_wheel_zoom_in")]
    pub wheel_zoom_in: f64,
    /// Zoom factor per wheel notch scrolled down.
    #[serde(default = "default_wheel_zoom_out")]
    pub wheel_zoom_out: f64,
    /// The focused box spans `1 / focus_padding` of the container.
    #[serde(default = "default_focus_padding")]
    pub focus_padding: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_label_gap")]
    pub label_gap: f64,
}

fn default_scale_min() -> f64 {
    SCALE_MIN
}
fn default_scale_max() -> f64 {
    SCALE_MAX
}
fn default_wheel_zoom_in() -> f64 {
    WHEEL_ZOOM_IN
}
fn default_wheel_zoom_out() -> f64 {
    WHEEL_ZOOM_OUT
}
fn default_focus_padding() -> f64 {
    FOCUS_PADDING
}
fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}
fn default_label_font_size() -> f64 {
    DEFAULT_LABEL_FONT_SIZE
}
fn default_label_gap() -> f64 {
    DEFAULT_LABEL_GAP
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            wheel_zoom_in: WHEEL_ZOOM_IN,
            wheel_zoom_out: WHEEL_ZOOM_OUT,
            focus_padding: FOCUS_PADDING,
            stroke_width: DEFAULT_STROKE_WIDTH,
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            label_gap: DEFAULT_LABEL_GAP,
        }
    }
}

impl ViewportConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ViewportError::InvalidConfig(format!("{name} must be > 0, got {v}")))
            }
        };
        positive("scale_min", self.scale_min)?;
        positive("scale_max", self.scale_max)?;
        positive("wheel_zoom_in", self.wheel_zoom_in)?;
        positive("wheel_zoom_out", self.wheel_zoom_out)?;
        positive("focus_padding", self.focus_padding)?;

        if self.scale_min > self.scale_max {
            return Err(ViewportError::InvalidConfig(format!(
                "scale_min ({}) exceeds scale_max ({})",
                self.scale_min, self.scale_max
            )));
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !(non_negative(self.stroke_width)
            && non_negative(self.label_font_size)
            && non_negative(self.label_gap))
        {
            return Err(ViewportError::InvalidConfig(
                "overlay sizes must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.scale_min, self.scale_max)
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            stroke_width: self.stroke_width,
            label_font_size: self.label_font_size,
            label_gap: self.label_gap,
        }
    }
}
