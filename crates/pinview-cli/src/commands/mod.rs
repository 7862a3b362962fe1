pub mod config;
pub mod map;
pub mod render;

use anyhow::{bail, Context, Result};

/// Parse a `WxH` size such as `800x600`.
pub fn parse_size(s: &str) -> Result<(f64, f64)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid size '{s}' (expected WxH)"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("Invalid width in '{s}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("Invalid height in '{s}'"))?;
    if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
        bail!("Size '{s}' must be non-negative");
    }
    Ok((w, h))
}

/// Parse a `WxH` pixel size with positive integer sides.
pub fn parse_pixels(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid size '{s}' (expected WxH)"))?;
    let w: u32 = w.trim().parse().with_context(|| format!("Invalid width in '{s}'"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("Invalid height in '{s}'"))?;
    if w == 0 || h == 0 {
        bail!("Image size '{s}' must be non-zero");
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600").unwrap(), (800.0, 600.0));
        assert_eq!(parse_size("12.5X3").unwrap(), (12.5, 3.0));
        assert!(parse_size("800").is_err());
        assert!(parse_size("-1x3").is_err());
    }

    #[test]
    fn test_parse_pixels() {
        assert_eq!(parse_pixels("1920x1080").unwrap(), (1920, 1080));
        assert!(parse_pixels("0x10").is_err());
        assert!(parse_pixels("10.5x10").is_err());
    }
}
