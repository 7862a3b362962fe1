use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid detection data: {0}")]
    DetectionParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Natural image size has not been set")]
    NaturalSizeUnset,

    #[error("Displayed image size has not been set")]
    DisplaySizeUnset,

    #[error("Non-finite {what}")]
    NonFinite { what: &'static str },

    #[error("Container has no area: {width}x{height}")]
    EmptyContainer { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, ViewportError>;
