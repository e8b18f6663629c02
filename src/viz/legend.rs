//! Single-entry legend drawn in the top margin.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::truncate_to_width;

const FONT_PX: u32 = 14;
const SWATCH_W: i32 = 24;
const SWATCH_TO_TEXT_GAP: i32 = 8;

/// Draw a line swatch followed by `label`, vertically centered on `origin.1`.
///
/// The label is truncated so the entry ends before `max_x`.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    label: &str,
    color: RGBColor,
    line_width: u32,
    origin: (i32, i32),
    max_x: i32,
) -> Result<()> {
    let (x, y) = origin;
    area.draw(&PathElement::new(
        vec![(x, y), (x + SWATCH_W, y)],
        color.stroke_width(line_width),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let text_x = x + SWATCH_W + SWATCH_TO_TEXT_GAP;
    let room = (max_x - text_x).max(0) as u32;
    let text = truncate_to_width(label, FONT_PX, room);
    let style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    area.draw(&Text::new(text, (text_x, y), style))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
