//! Shared chart styling

use plotters::element::ComposedElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use crate::layout::ModelSize;

/// Font family for every text element
pub const FONT: &str = "sans-serif";

/// Per-model series color.
#[must_use]
pub const fn model_color(model: ModelSize) -> RGBColor {
    match model {
        ModelSize::B3 => RGBColor(0x48, 0x8f, 0xba),
        ModelSize::B7 => RGBColor(0xff, 0xcc, 0x33),
        ModelSize::B14 => RGBColor(0x5e, 0xbf, 0x9e),
    }
}

/// Baseline star color on the shared accuracy/token chart
pub const BASELINE_STAR: RGBColor = RGBColor(0xa5, 0x2a, 0x2a);

/// Gray used for reference lines
pub const REFERENCE_GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Marker shape for a model's compressed-ratio points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Filled circle
    Circle,
    /// Filled diamond
    Diamond,
}

impl Marker {
    /// 14B is drawn with diamonds, smaller models with circles.
    #[must_use]
    pub const fn for_model(model: ModelSize) -> Self {
        match model {
            ModelSize::B14 => Self::Diamond,
            ModelSize::B3 | ModelSize::B7 => Self::Circle,
        }
    }
}

/// Points of a five-pointed star of outer radius `r`, centred on (0, 0).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn star_points(r: i32) -> Vec<(i32, i32)> {
    let outer = f64::from(r);
    let inner = outer * 0.4;
    (0..10_i32)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = std::f64::consts::PI * f64::from(i) / 5.0 - std::f64::consts::FRAC_PI_2;
            (
                (radius * angle.cos()).round() as i32,
                (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Points of a diamond of half-diagonal `r`, centred on (0, 0).
#[must_use]
pub const fn diamond_points(r: i32) -> [(i32, i32); 4] {
    [(0, -r), (r, 0), (0, r), (-r, 0)]
}

/// Points of a 24-gon of radius `r` standing in for a circle.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn circle_points(r: i32) -> Vec<(i32, i32)> {
    let radius = f64::from(r);
    (0..24_i32)
        .map(|i| {
            let angle = std::f64::consts::PI * f64::from(i) / 12.0;
            (
                (radius * angle.cos()).round() as i32,
                (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Filled shape with a black outline, anchored at a data coordinate.
pub type Glyph<C, DB> = ComposedElement<C, DB, Polygon<(i32, i32)>, PathElement<(i32, i32)>>;

fn outlined<C, DB: DrawingBackend>(coord: C, pts: Vec<(i32, i32)>, color: RGBColor) -> Glyph<C, DB> {
    let mut outline = pts.clone();
    if let Some(&first) = pts.first() {
        outline.push(first);
    }
    EmptyElement::at(coord)
        + Polygon::new(pts, color.filled())
        + PathElement::new(outline, BLACK.stroke_width(1))
}

/// Filled star with a black outline at `coord`.
pub fn star<C, DB: DrawingBackend>(coord: C, r: i32, color: RGBColor) -> Glyph<C, DB> {
    outlined(coord, star_points(r), color)
}

/// Filled marker with a black outline at `coord`.
pub fn marker<C, DB: DrawingBackend>(coord: C, shape: Marker, r: i32, color: RGBColor) -> Glyph<C, DB> {
    let pts = match shape {
        Marker::Circle => circle_points(r),
        Marker::Diamond => diamond_points(r).to_vec(),
    };
    outlined(coord, pts, color)
}

/// Bold, centred style for point annotations.
#[must_use]
pub fn label_style(size: f64) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font().style(FontStyle::Bold))
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Label offset (pixels, screen y down) avoiding overlaps on dense panels.
///
/// 14B labels alternate above and below; the 0.9 label sits below its point.
#[must_use]
pub fn label_offset(model: ModelSize, index: usize, ratio_label: &str) -> i32 {
    if model == ModelSize::B14 && index % 2 == 1 {
        18
    } else if ratio_label == "0.9" {
        15
    } else {
        -12
    }
}
