use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use pinview_core::consts::DEFAULT_DETECTION_LIMIT;
use pinview_core::detection::parse_detections;
use pinview_core::{fit_display, DetectionSet, RenderFrame, Session, Viewport, ViewportConfig};
use serde::Serialize;
use tracing::{info, warn};

use super::{parse_pixels, parse_size};
use crate::script::{parse_script, run_script};
use crate::summary::print_render_summary;

#[derive(Args)]
pub struct RenderArgs {
    /// Image file; only its header is read, for the natural size
    #[arg(long, required_unless_present = "natural", conflicts_with = "natural")]
    pub image: Option<PathBuf>,

    /// Natural image size instead of an image file, e.g. 4000x3000
    #[arg(long, value_parser = parse_pixels)]
    pub natural: Option<(u32, u32)>,

    /// Detection JSON: a bare array or a full analysis response
    #[arg(short, long)]
    pub detections: Option<PathBuf>,

    /// Container size, e.g. 800x600
    #[arg(long, value_parser = parse_size)]
    pub container: (f64, f64),

    /// Displayed image size at scale 1 (default: contain-fit, refitted on resize)
    #[arg(long, value_parser = parse_size)]
    pub display: Option<(f64, f64)>,

    /// Script of view operations to replay
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Hide detections below this confidence
    #[arg(long, default_value_t = DEFAULT_DETECTION_LIMIT)]
    pub min_confidence: f64,

    /// Viewport config TOML
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the render frame as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RenderReport<'a> {
    image: &'a str,
    natural_width: u32,
    natural_height: u32,
    display_width: f64,
    display_height: f64,
    #[serde(flatten)]
    frame: &'a RenderFrame,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => ViewportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewportConfig::default(),
    };

    let (name, (nw, nh)) = match (&args.image, args.natural) {
        (Some(path), _) => {
            let dims = image::image_dimensions(path)
                .with_context(|| format!("Failed to read image header of {}", path.display()))?;
            (path.display().to_string(), dims)
        }
        (None, Some(dims)) => ("<synthetic>".to_string(), dims),
        (None, None) => bail!("Either --image or --natural is required"),
    };

    let detections = match args.detections {
        Some(ref path) => Some(load_detections(path, args.image.as_deref())?),
        None => None,
    };

    let mut viewport = Viewport::new(config);
    let mut session = Session::new(args.min_confidence);
    let (cw, ch) = args.container;
    viewport.update_container_size(cw, ch);

    let id = session.add_image(name.clone(), nw, nh);
    session.select_image(id, &mut viewport);
    match args.display {
        Some((dw, dh)) => viewport.set_display_size(dw, dh),
        None => viewport.set_resize_callback(fit_display),
    }
    if let Some(set) = detections {
        session.apply_results(id, set, &mut viewport);
    }
    info!(
        annotations = viewport.annotation_count(),
        limit = session.detection_limit(),
        "Viewport ready"
    );

    if let Some(ref path) = args.script {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let commands = parse_script(&source)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        run_script(&mut viewport, &commands);
    }

    let frame = viewport.render_frame();
    if args.json {
        let image = viewport.image_frame();
        let report = RenderReport {
            image: &name,
            natural_width: image.natural_width,
            natural_height: image.natural_height,
            display_width: image.display_width,
            display_height: image.display_height,
            frame: &frame,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_render_summary(&name, &viewport, &frame);
    }

    Ok(())
}

/// Read a detection file and pick the result set for `image`, falling back to
/// the first set when no `image_path` matches.
fn load_detections(path: &Path, image: Option<&Path>) -> Result<DetectionSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read detections {}", path.display()))?;
    let mut response = parse_detections(&json)
        .with_context(|| format!("Failed to parse detections {}", path.display()))?;

    for error in &response.errors {
        warn!(%error, "Detection service reported an error");
    }

    let file_name = image
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());
    Ok(response
        .take_for_image(file_name.as_deref())
        .unwrap_or_else(|| {
            warn!(path = %path.display(), "Detection file has no result sets");
            DetectionSet::default()
        }))
}
