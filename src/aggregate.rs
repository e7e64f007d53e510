//! Trial averaging and derived ratios
//!
//! Toyota Way: Genchi Genbutsu (average what was measured, skip what wasn't)

/// Arithmetic mean of the present values.
///
/// Absent values are dropped before averaging; `None` if nothing remains.
///
/// ```rust
/// use energy_report::aggregate::mean;
///
/// assert_eq!(mean([Some(10.0), Some(12.0), None, Some(14.0)]), Some(12.0));
/// assert_eq!(mean([None, None]), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Percentage saved relative to `baseline`.
///
/// `(baseline - measured) / baseline * 100`; negative when `measured`
/// exceeds the baseline. `None` for a zero baseline.
#[must_use]
pub fn percent_saving(baseline: f64, measured: f64) -> Option<f64> {
    (baseline != 0.0).then(|| (baseline - measured) / baseline * 100.0)
}

/// Percentage of tokens removed relative to `baseline`.
///
/// Same formula as [`percent_saving`]: baseline 200, measured 150 → 25 %.
#[must_use]
pub fn percent_reduction(baseline: f64, measured: f64) -> Option<f64> {
    percent_saving(baseline, measured)
}

/// Pearson correlation coefficient.
///
/// `None` for mismatched lengths, fewer than two pairs, or a constant
/// series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    (denom > 0.0).then(|| sxy / denom)
}

/// Closed axis interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl AxisRange {
    /// Span of `values` widened by `fraction` of that span on each side.
    ///
    /// A degenerate span (single value) is widened by `fraction` of the
    /// magnitude instead, or by 1.0 around zero, so the interval is never
    /// empty. `None` when there are no finite values.
    #[must_use]
    pub fn padded<I>(values: I, fraction: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        let span = max - min;
        let pad = if span > 0.0 {
            span * fraction
        } else if min != 0.0 {
            min.abs() * fraction
        } else {
            1.0
        };
        Some(Self {
            min: min - pad,
            max: max + pad,
        })
    }

    /// True if `value` lies inside the interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// As a `Range` for chart coordinates.
    #[must_use]
    pub const fn as_range(&self) -> std::ops::Range<f64> {
        self.min..self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_skips_missing_trials() {
        assert_eq!(mean([Some(10.0), Some(12.0), None, Some(14.0)]), Some(12.0));
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
        assert_eq!(mean([None]), None);
    }

    #[test]
    fn test_token_reduction() {
        assert_eq!(percent_reduction(200.0, 150.0), Some(25.0));
        assert_eq!(percent_reduction(200.0, 200.0), Some(0.0));
        assert_eq!(percent_reduction(0.0, 10.0), None);
    }

    #[test]
    fn test_energy_saving_can_be_negative() {
        assert_eq!(percent_saving(100.0, 110.0), Some(-10.0));
    }

    #[test]
    fn test_pearson_linear() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 1.0).collect();
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
        let neg: Vec<f64> = xs.iter().map(|x| -x).collect();
        assert!((pearson(&xs, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[5.0, 5.0]), None);
    }

    #[test]
    fn test_padded_range() {
        let range = AxisRange::padded([10.0, 20.0, 15.0], 0.1).unwrap();
        assert!((range.min - 9.0).abs() < 1e-12);
        assert!((range.max - 21.0).abs() < 1e-12);
        assert!(range.contains(10.0) && range.contains(20.0));
    }

    #[test]
    fn test_padded_range_single_value() {
        let range = AxisRange::padded([50.0], 0.1).unwrap();
        assert!(range.min < 50.0 && range.max > 50.0);
        let zero = AxisRange::padded([0.0], 0.1).unwrap();
        assert!(zero.min < 0.0 && zero.max > 0.0);
        assert!(AxisRange::padded(std::iter::empty(), 0.1).is_none());
    }
}
