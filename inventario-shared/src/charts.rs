//! Bar chart scaling shared by the dashboard and the daily report.

/// Smallest height, in percent, a bar is drawn with so empty buckets stay visible.
pub const DEFAULT_MIN_BAR_PCT: f64 = 5.0;

/// One bar ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Height relative to the tallest bar, in `[min_pct, 100]`.
    pub height_pct: f64,
}

/// Scale `values` against their maximum.
///
/// The tallest bar is 100%. Every height is clamped to at least `min_pct`,
/// so when all values are zero (or negative) every bar sits at the minimum.
#[must_use]
pub fn scale_bars(values: &[f64], min_pct: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|&value| {
            if max > 0.0 {
                (value / max * 100.0).clamp(min_pct, 100.0)
            } else {
                min_pct
            }
        })
        .collect()
}

/// Build labelled bars from `(label, value)` pairs, preserving their order.
pub fn bars<I, L>(points: I, min_pct: f64) -> Vec<Bar>
where
    I: IntoIterator<Item = (L, f64)>,
    L: Into<String>,
{
    let (labels, values): (Vec<String>, Vec<f64>) = points
        .into_iter()
        .map(|(label, value)| (label.into(), value))
        .unzip();
    let heights = scale_bars(&values, min_pct);
    labels
        .into_iter()
        .zip(values)
        .zip(heights)
        .map(|((label, value), height_pct)| Bar {
            label,
            value,
            height_pct,
        })
        .collect()
}

/// `part` as a percentage of `total`; zero when the total is not positive.
#[must_use]
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn tallest_bar_is_full_height() {
        let heights = scale_bars(&[100.0, 50.0], DEFAULT_MIN_BAR_PCT);
        assert!(approx(heights[0], 100.0));
        assert!(approx(heights[1], 50.0));
    }

    #[test]
    fn all_zero_values_sit_at_minimum() {
        let heights = scale_bars(&[0.0, 0.0, 0.0], DEFAULT_MIN_BAR_PCT);
        assert!(heights.iter().all(|&h| approx(h, DEFAULT_MIN_BAR_PCT)));
    }

    #[test]
    fn tiny_values_are_raised_to_minimum() {
        let heights = scale_bars(&[1000.0, 1.0], 5.0);
        assert!(approx(heights[1], 5.0));
    }

    #[test]
    fn empty_input_gives_no_bars() {
        assert!(scale_bars(&[], 5.0).is_empty());
        assert!(bars(Vec::<(String, f64)>::new(), 5.0).is_empty());
    }

    #[test]
    fn bars_keep_labels_and_order() {
        let result = bars([("10:00", 100.0), ("11:00", 50.0)], 5.0);
        assert_eq!(result[0].label, "10:00");
        assert!(approx(result[1].height_pct, 50.0));
        assert!(approx(result[1].value, 50.0));
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert!(approx(share_pct(5.0, 0.0), 0.0));
        assert!(approx(share_pct(25.0, 200.0), 12.5));
    }
}
