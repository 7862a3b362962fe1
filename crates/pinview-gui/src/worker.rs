use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use pinview_core::detection::parse_detections;
use pinview_core::ViewportConfig;
use tracing::{debug, info};

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the file loading thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("pinview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, err: anyhow::Error) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: format!("{err:#}"),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let result = match cmd {
            WorkerCommand::LoadImage { path } => load_image(&path),
            WorkerCommand::LoadDetections { path } => load_detections(&path),
            WorkerCommand::LoadConfig { path } => load_config(&path),
        };
        match result {
            Ok(result) => send(&tx, &ctx, result),
            Err(err) => send_error(&tx, &ctx, err),
        }
    }
    debug!("Worker channel closed");
}

fn load_image(path: &Path) -> Result<WorkerResult> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (natural_width, natural_height) = decoded.dimensions();
    info!(path = %path.display(), natural_width, natural_height, "Image decoded");

    Ok(WorkerResult::ImageLoaded {
        path: path.to_path_buf(),
        image: rgba_to_color_image(&decoded),
        natural_width,
        natural_height,
    })
}

fn load_detections(path: &Path) -> Result<WorkerResult> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let response = parse_detections(&json)
        .with_context(|| format!("Failed to parse detections {}", path.display()))?;
    info!(path = %path.display(), sets = response.results.len(), "Detections parsed");

    Ok(WorkerResult::DetectionsLoaded {
        path: path.to_path_buf(),
        response,
    })
}

fn load_config(path: &Path) -> Result<WorkerResult> {
    let config = ViewportConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(WorkerResult::ConfigLoaded {
        path: path.to_path_buf(),
        config,
    })
}
