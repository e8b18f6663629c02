//! Color conversion and font registration for the plotters backends.

use crate::ticks::Rgb;
use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Axis label gray, rgb(102, 102, 102).
pub const LABEL_GRAY: RGBColor = RGBColor(102, 102, 102);

#[inline]
pub fn to_rgb(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Stroke style with an opacity applied to the color.
pub fn stroke(c: Rgb, opacity: f64, width: u32) -> ShapeStyle {
    to_rgb(c).mix(opacity).stroke_width(width)
}

static FONT_REGISTERED: OnceLock<()> = OnceLock::new();

/// Register a TrueType file as the "sans-serif" family for the `ab_glyph` text path.
///
/// Bitmap output rasterizes text itself and `ab_glyph` does not discover OS
/// fonts. The first successful registration wins for the whole process.
pub fn ensure_font_registered(path: &Path) -> Result<()> {
    if FONT_REGISTERED.get().is_some() {
        return Ok(());
    }
    let bytes = fs::read(path).with_context(|| format!("read font {}", path.display()))?;
    // plotters keeps a `'static` reference to registered font data
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("{} is not a usable TrueType font", path.display()))?;
    let _ = FONT_REGISTERED.set(());
    log::debug!("registered font {}", path.display());
    Ok(())
}
