use anyhow::{bail, Result};
use clap::Args;
use pinview_core::geometry::contain_fit;
use pinview_core::Viewport;

use super::{parse_pixels, parse_size};

#[derive(Args)]
pub struct MapArgs {
    /// Natural image size, e.g. 4000x3000
    #[arg(long, value_parser = parse_pixels)]
    pub natural: (u32, u32),

    /// Container size, e.g. 800x600
    #[arg(long, value_parser = parse_size)]
    pub container: (f64, f64),

    /// Displayed image size at scale 1 (default: contain-fit into the container)
    #[arg(long, value_parser = parse_size)]
    pub display: Option<(f64, f64)>,

    /// Rectangle in natural-image pixels
    #[arg(allow_negative_numbers = true)]
    pub x: f64,
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn run(args: &MapArgs) -> Result<()> {
    let (nw, nh) = args.natural;
    let (cw, ch) = args.container;

    let mut viewport = Viewport::default();
    viewport.update_container_size(cw, ch);
    viewport.set_natural_size(nw, nh);
    let (dw, dh) = args
        .display
        .unwrap_or_else(|| contain_fit(nw, nh, viewport.container()));
    viewport.set_display_size(dw, dh);

    let Some(rect) = viewport.image_to_container(args.x, args.y, args.width, args.height) else {
        bail!("Cannot map: container {cw}x{ch} or display {dw}x{dh} has no area");
    };
    println!(
        "{:.3} {:.3} {:.3} {:.3}",
        rect.x, rect.y, rect.width, rect.height
    );
    Ok(())
}
