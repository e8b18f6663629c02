//! Render a prepared chart to **SVG** or **PNG** with plotters.
//!
//! The renderer applies [`TickDecision`]s verbatim: one horizontal gridline per
//! visible tick, at the decided offset and length, in the decided stroke. On
//! top of that it draws the time-axis labels, the series line (clipped into
//! the value domain), an end-of-series marker with the latest change, and a
//! legend in the top margin.
//!
//! [`TickDecision`]: crate::ticks::TickDecision

pub mod legend;
pub mod text;
pub mod util;

use crate::chart::ChartData;
use crate::config::ChartConfig;
use crate::ticks::TickKind;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

use legend::draw_legend;
use text::{Side, place_beside};
use util::{LABEL_GRAY, ensure_font_registered, stroke, to_rgb};

const LABEL_FONT_PX: u32 = 12;
/// Left inset of value-axis labels; round ticks leave `tick_offset` px free for them.
const LABEL_X: i32 = 8;
const TIME_LABEL_GAP: i32 = 6;
const END_MARKER_RADIUS: u32 = 5;
const END_LABEL_GAP: i32 = 10;
const END_LABEL_FONT_PX: u32 = 14;

/// Render to `out_path`: SVG when the extension is `.svg`, PNG otherwise.
///
/// PNG output rasterizes text and therefore needs `config.font_path`.
pub fn render_chart<P: AsRef<Path>>(data: &ChartData, config: &ChartConfig, out_path: P) -> Result<()> {
    config.validate()?;
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (config.width, config.height);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, data, config)?;
    } else {
        let font = config.font_path.as_deref().ok_or_else(|| {
            anyhow!("PNG output needs `font_path` in the config; use a .svg path otherwise")
        })?;
        ensure_font_registered(font)?;
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, data, config)?;
    }
    log::debug!("rendered {} to {}", data.series.label(), out_path.display());
    Ok(())
}

/// Render to an in-memory SVG document.
pub fn render_svg_string(data: &ChartData, config: &ChartConfig) -> Result<String> {
    config.validate()?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (config.width, config.height)).into_drawing_area();
        draw_chart(root, data, config)?;
    }
    Ok(buf)
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(root: DrawingArea<DB, Shift>, data: &ChartData, config: &ChartConfig) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let m = config.margin;
    let value = data.domain.value;
    let span = data.domain.span_days().max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .margin_top(m.top)
        .margin_right(m.right)
        .margin_bottom(m.bottom)
        .margin_left(m.left)
        .build_cartesian_2d(0f64..span, value.min..value.max)
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 1) Gridlines + value labels
    // ----------------------------
    let label_color = LABEL_GRAY.mix(0.6);
    let label_style: TextStyle = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .color(&label_color);
    for tick in data.ticks.iter().filter(|t| t.visible) {
        let (_, y) = chart.backend_coord(&(0.0, tick.value));
        let x0 = tick.gridline_offset.round() as i32;
        let x1 = x0 + tick.gridline_length.round() as i32;
        root.draw(&PathElement::new(
            vec![(x0, y), (x1, y)],
            stroke(tick.stroke, tick.stroke_opacity, 1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

        if tick.label_visible {
            // The baseline line runs under the label slot, so its label sits just above it.
            let (pos, label_y) = match tick.kind {
                TickKind::Baseline => (Pos::new(HPos::Left, VPos::Bottom), y - 3),
                _ => (Pos::new(HPos::Left, VPos::Center), y),
            };
            root.draw(&Text::new(
                tick.label_text.clone(),
                (LABEL_X, label_y),
                label_style.pos(pos),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    // ----------------------------
    // 2) Time-axis labels
    // ----------------------------
    let time_style = label_style.pos(Pos::new(HPos::Center, VPos::Top));
    for t in &data.time_ticks {
        let (x, y) = chart.backend_coord(&(data.domain.day_offset(t.date), value.min));
        root.draw(&Text::new(t.label.clone(), (x, y + TIME_LABEL_GAP), time_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 3) Series line + end marker
    // ----------------------------
    let color = to_rgb(config.line_color);
    let line: Vec<(f64, f64)> = data
        .series
        .points
        .iter()
        .map(|p| (data.domain.day_offset(p.date), value.clamp(p.ratio)))
        .collect();
    chart
        .draw_series(LineSeries::new(line, color.stroke_width(config.line_width)))
        .map_err(|e| anyhow!("{:?}", e))?;

    if let Some(last) = data.series.last() {
        let at = (data.domain.day_offset(last.date), value.clamp(last.ratio));
        chart
            .draw_series(std::iter::once(Circle::new(at, END_MARKER_RADIUS, color.filled())))
            .map_err(|e| anyhow!("{:?}", e))?;

        let (px, py) = chart.backend_coord(&at);
        let (side, tx) = place_beside(
            px,
            &last.percentage_change,
            END_LABEL_FONT_PX,
            END_LABEL_GAP,
            config.width as i32,
        );
        let pos = match side {
            Side::Right => Pos::new(HPos::Left, VPos::Center),
            Side::Left => Pos::new(HPos::Right, VPos::Center),
        };
        let end_style = TextStyle::from((FontFamily::SansSerif, END_LABEL_FONT_PX))
            .color(&color)
            .pos(pos);
        root.draw(&Text::new(last.percentage_change.clone(), (tx, py), end_style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Title + legend in the top margin
    // ----------------------------
    if let Some(first) = data.series.first() {
        let subtitle = format!(
            "Change in routing requests since {}",
            first.date.format("%B %-d, %Y")
        );
        let sub_style = TextStyle::from((FontFamily::SansSerif, 14u32))
            .color(&LABEL_GRAY)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(subtitle, (m.left as i32, m.top as i32 / 3), sub_style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    draw_legend(
        &root,
        &data.series.label(),
        color,
        config.line_width,
        (m.left as i32, m.top as i32 * 2 / 3),
        config.width as i32 - m.right as i32,
    )?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
