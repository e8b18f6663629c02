//! Gridline and label policy for value-axis ticks.
//!
//! A tick value is classified into exactly one [`TickKind`] by walking
//! [`DECISION_TABLE`] top to bottom; the first matching predicate wins. The
//! predicates overlap (`0` is also an even tenth), so the row order is part of
//! the contract:
//!
//! | priority | predicate            | kind       | gridline             | label            |
//! |----------|----------------------|------------|----------------------|------------------|
//! | 1        | `v == 1`             | `Baseline` | full span, emphasized| `Baseline`       |
//! | 2        | `v == 0`             | `Zero`     | full span            | hidden           |
//! | 3        | `(v * 10) mod 2 == 0`| `Round`    | shortened + shifted  | signed `v - 1`   |
//! | -        | otherwise            | `Ordinary` | full span            | hidden           |

use crate::axis::ValueDomain;
use crate::series::format_change;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB color, written as `#rrggbb` or `rgb(r, g, b)` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(format!("expected #rrggbb, got `{s}`"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("`{s}`: {e}"))
            };
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }
        if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if let [r, g, b] = parts.as_slice() {
                let channel = |c: &str| c.parse::<u8>().map_err(|e| format!("`{s}`: {e}"));
                return Ok(Rgb::new(channel(*r)?, channel(*g)?, channel(*b)?));
            }
        }
        Err(format!("unrecognized color `{s}`"))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Horizontal geometry the gridlines are laid out against (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub chart_width: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    /// Gap left of "round" gridlines where their label sits.
    pub tick_offset: f64,
}

impl ChartGeometry {
    /// Chart width plus both margins.
    pub fn full_span(&self) -> f64 {
        self.chart_width + self.left_margin + self.right_margin
    }
}

/// What the baseline tick label reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineLabel {
    /// The literal word `Baseline`.
    #[default]
    Literal,
    /// The formatted change, `+0%`.
    Percent,
}

/// Colors and opacities for gridlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyle {
    pub emphasized: Rgb,
    pub neutral: Rgb,
    pub emphasized_opacity: f64,
    pub neutral_opacity: f64,
    pub baseline_label: BaselineLabel,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            emphasized: Rgb::new(99, 99, 102),
            neutral: Rgb::new(0xd6, 0xd6, 0xd6),
            emphasized_opacity: 1.0,
            neutral_opacity: 0.5,
            baseline_label: BaselineLabel::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    /// `v == 1`: no change from baseline.
    Baseline,
    /// `v == 0`.
    Zero,
    /// Even tenths: labelled every other step.
    Round,
    /// Odd tenths and anything off the tenths grid.
    Ordinary,
}

/// Tolerance when snapping `v * 10` to an integer.
const TENTHS_EPSILON: f64 = 1e-9;

/// `v` expressed in whole tenths, if it sits on the tenths grid.
fn tenths(v: f64) -> Option<i64> {
    let scaled = v * 10.0;
    let snapped = scaled.round();
    (scaled.is_finite() && (scaled - snapped).abs() <= TENTHS_EPSILON).then_some(snapped as i64)
}

fn is_baseline(v: f64) -> bool {
    tenths(v) == Some(10)
}

fn is_zero(v: f64) -> bool {
    tenths(v) == Some(0)
}

fn is_even_tenth(v: f64) -> bool {
    tenths(v).is_some_and(|t| t.rem_euclid(2) == 0)
}

/// Ordered classification rules; anything unmatched is [`TickKind::Ordinary`].
pub const DECISION_TABLE: [(TickKind, fn(f64) -> bool); 3] = [
    (TickKind::Baseline, is_baseline),
    (TickKind::Zero, is_zero),
    (TickKind::Round, is_even_tenth),
];

impl TickKind {
    pub fn classify(v: f64) -> Self {
        DECISION_TABLE
            .iter()
            .find(|(_, pred)| pred(v))
            .map(|(kind, _)| *kind)
            .unwrap_or(TickKind::Ordinary)
    }
}

/// Everything the renderer needs to draw one value-axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickDecision {
    pub value: f64,
    pub kind: TickKind,
    /// False when `value` falls outside the value domain; the baseline is always visible.
    pub visible: bool,
    pub gridline_length: f64,
    /// Horizontal shift of the gridline start, from the canvas' left edge.
    pub gridline_offset: f64,
    pub stroke: Rgb,
    pub stroke_opacity: f64,
    pub label_visible: bool,
    pub label_text: String,
}

/// Tick policy bound to one chart's domain and geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPolicy {
    pub domain: ValueDomain,
    pub geometry: ChartGeometry,
    pub style: TickStyle,
}

impl TickPolicy {
    pub fn new(domain: ValueDomain, geometry: ChartGeometry, style: TickStyle) -> Self {
        Self {
            domain,
            geometry,
            style,
        }
    }

    /// Decide gridline and label treatment for tick value `v`.
    pub fn decide(&self, v: f64) -> TickDecision {
        let kind = TickKind::classify(v);
        let full = self.geometry.full_span();
        let visible = kind == TickKind::Baseline || self.domain.contains(v);

        let (gridline_length, gridline_offset) = match kind {
            TickKind::Round => (full - self.geometry.tick_offset, self.geometry.tick_offset),
            TickKind::Baseline | TickKind::Zero | TickKind::Ordinary => (full, 0.0),
        };
        let (stroke, stroke_opacity) = match kind {
            TickKind::Baseline => (self.style.emphasized, self.style.emphasized_opacity),
            _ => (self.style.neutral, self.style.neutral_opacity),
        };
        let label_text = match (kind, self.style.baseline_label) {
            (TickKind::Baseline, BaselineLabel::Literal) => "Baseline".to_string(),
            _ => format_change(v),
        };
        let label_visible = visible && matches!(kind, TickKind::Baseline | TickKind::Round);

        TickDecision {
            value: v,
            kind,
            visible,
            gridline_length,
            gridline_offset,
            stroke,
            stroke_opacity,
            label_visible,
            label_text,
        }
    }

    pub fn decide_all(&self, values: &[f64]) -> Vec<TickDecision> {
        let out: Vec<TickDecision> = values.iter().map(|&v| self.decide(v)).collect();
        log::debug!("decided {} value-axis tick(s)", out.len());
        out
    }
}
