//! PNG chart rendering
//!
//! One module per chart; each exposes its fixed output file name and a
//! `render(report, path)` function drawing a [`crate::report`] dataset with
//! the `plotters` bitmap backend.

pub mod accuracy_tokens;
pub mod consistency;
pub mod panels;
pub mod reduction;
pub mod savings;
pub mod style;

/// X coordinate for a ratio on charts whose ratio axis runs from 1.0 down.
///
/// The axis is built over negated ratios so the baseline sits on the left.
#[must_use]
pub fn ratio_axis(ratio: f64) -> f64 {
    -ratio
}

/// Tick label for a negated ratio coordinate.
#[must_use]
pub fn ratio_tick(x: &f64) -> String {
    format!("{:.1}", -x)
}

/// Assert that `path` holds a PNG image.
#[cfg(test)]
pub(crate) fn assert_png(path: &std::path::Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "{} is not a PNG",
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_axis_round_trips_label() {
        assert_eq!(ratio_tick(&ratio_axis(0.7)), "0.7");
        assert!(ratio_axis(1.0) < ratio_axis(0.5));
    }
}
