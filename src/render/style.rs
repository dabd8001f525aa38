use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{BLACK, Color, IntoFont, RGBAColor, TextStyle};

/// Ambient chart styling, passed explicitly into every renderer.
///
/// Both charts share the dashed faded grid and the font stack; the canvas
/// size is the only field callers usually override.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub caption_font: &'static str,
    pub caption_size: u32,
    pub label_font: &'static str,
    pub label_size: u32,
    pub tick_size: u32,
    pub annotation_size: u32,
    pub grid_color: RGBAColor,
    /// Dash/gap lengths (pixels) for gridlines.
    pub grid_dash: (i32, i32),
    /// Dash/gap lengths (pixels) for mean reference lines.
    pub mean_dash: (i32, i32),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            caption_font: "sans-serif",
            caption_size: 24,
            label_font: "sans-serif",
            label_size: 16,
            tick_size: 13,
            annotation_size: 13,
            grid_color: BLACK.mix(0.25),
            grid_dash: (6, 4),
            mean_dash: (10, 6),
        }
    }
}

impl ChartStyle {
    pub fn caption(&self) -> (&'static str, u32) {
        (self.caption_font, self.caption_size)
    }

    pub fn axis_desc(&self) -> (&'static str, u32) {
        (self.label_font, self.label_size)
    }

    pub fn tick_label(&self) -> (&'static str, u32) {
        (self.label_font, self.tick_size)
    }

    /// Style for the per-bar value labels: anchored so the text sits
    /// centered immediately above the given point.
    pub fn annotation(&self) -> TextStyle<'static> {
        TextStyle::from((self.label_font, self.annotation_size).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom))
    }
}
