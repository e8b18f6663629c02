//! Chart configuration: every layout and styling constant in one place.
//!
//! Values come from `ChartConfig::default()`, optionally overlaid by a TOML
//! file (missing keys keep their defaults), then by CLI flags.

use crate::axis::ValueDomain;
use crate::ticks::{ChartGeometry, Rgb, TickStyle};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 150,
            right: 100,
            bottom: 50,
            left: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
    pub margin: Margins,
    pub tick_offset: u32,
    /// Upper bound of the value axis; the lower bound is always 0.
    pub value_max: f64,
    /// Approximate number of value-axis ticks.
    pub tick_count: usize,
    pub ticks: TickStyle,
    pub line_color: Rgb,
    pub line_width: u32,
    /// TrueType font used for PNG output. SVG output never needs it.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            margin: Margins::default(),
            tick_offset: 46,
            value_max: 1.5,
            tick_count: 12,
            ticks: TickStyle::default(),
            // steelblue
            line_color: Rgb::new(70, 130, 180),
            line_width: 3,
            font_path: None,
        }
    }
}

impl ChartConfig {
    /// Read a TOML file over the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: ChartConfig =
            toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
        log::debug!("loaded chart config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chart_width() == 0 || self.chart_height() == 0 {
            bail!(
                "canvas {}x{} leaves no room inside margins {:?}",
                self.width,
                self.height,
                self.margin
            );
        }
        if !(self.value_max.is_finite() && self.value_max > 0.0) {
            bail!("value_max must be a positive number, got {}", self.value_max);
        }
        if self.tick_offset >= self.width {
            bail!("tick_offset {} exceeds canvas width {}", self.tick_offset, self.width);
        }
        Ok(())
    }

    /// Plot width inside the left/right margins.
    pub fn chart_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left)
            .saturating_sub(self.margin.right)
    }

    /// Plot height inside the top/bottom margins.
    pub fn chart_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top)
            .saturating_sub(self.margin.bottom)
    }

    pub fn value_domain(&self) -> ValueDomain {
        ValueDomain::up_to(self.value_max)
    }

    pub fn geometry(&self) -> ChartGeometry {
        ChartGeometry {
            chart_width: self.chart_width() as f64,
            left_margin: self.margin.left as f64,
            right_margin: self.margin.right as f64,
            tick_offset: self.tick_offset as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticks::BaselineLabel;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: ChartConfig = toml::from_str(
            r##"
value_max = 2.0

[margin]
left = 60

[ticks]
neutral = "#cccccc"
baseline_label = "percent"
"##,
        )
        .unwrap();
        assert_eq!(cfg.value_max, 2.0);
        assert_eq!(cfg.margin.left, 60);
        assert_eq!(cfg.margin.top, 150);
        assert_eq!(cfg.ticks.neutral, Rgb::new(0xcc, 0xcc, 0xcc));
        assert_eq!(cfg.ticks.emphasized, Rgb::new(99, 99, 102));
        assert_eq!(cfg.ticks.baseline_label, BaselineLabel::Percent);
        assert_eq!(cfg.tick_offset, 46);
    }

    #[test]
    fn geometry_spans_canvas() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.chart_width(), 850);
        assert_eq!(cfg.geometry().full_span(), 1000.0);
        cfg.validate().unwrap();
    }

    #[test]
    fn margins_larger_than_canvas_are_rejected() {
        let cfg = ChartConfig {
            width: 120,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
