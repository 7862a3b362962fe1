use std::path::PathBuf;

use pinview_core::detection::AnalysisResponse;
use pinview_core::ViewportConfig;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file for display.
    LoadImage { path: PathBuf },

    /// Read and parse a detection JSON file.
    LoadDetections { path: PathBuf },

    /// Read a viewport config TOML.
    LoadConfig { path: PathBuf },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        path: PathBuf,
        image: egui::ColorImage,
        natural_width: u32,
        natural_height: u32,
    },
    DetectionsLoaded {
        path: PathBuf,
        response: AnalysisResponse,
    },
    ConfigLoaded {
        path: PathBuf,
        config: ViewportConfig,
    },
    Error {
        message: String,
    },
}
