//! Text measurement and placement (Plotters has no measuring without a loaded font).

/// Width of `text` at `font_px`, assuming an average glyph of 0.6 em.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Longest prefix of `text` that fits in `max_px`, ending in `…` when cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut kept: Vec<char> = text.chars().collect();
    while !kept.is_empty() {
        kept.pop();
        let candidate: String = kept.iter().chain(std::iter::once(&'…')).collect();
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            return candidate;
        }
    }
    String::new()
}

/// Which side of an anchor point a label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
}

/// Place a label `gap` px beside `anchor_x`, preferring the right.
///
/// Flips to the left when the label would cross `limit_x`. Returns the side and
/// the x coordinate of the label's near edge.
pub fn place_beside(anchor_x: i32, text: &str, font_px: u32, gap: i32, limit_x: i32) -> (Side, i32) {
    let w = estimate_text_width_px(text, font_px) as i32;
    if anchor_x + gap + w > limit_x {
        (Side::Left, anchor_x - gap)
    } else {
        (Side::Right, anchor_x + gap)
    }
}
