//! Unicode sparklines for per-epoch curves

/// Unicode sparkline characters, lowest to highest.
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Sample `values` down to at most `width` points.
fn subsample(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }
    let step = values.len() as f64 / width as f64;
    (0..width)
        .map(|i| values[((i as f64 * step) as usize).min(values.len() - 1)])
        .collect()
}

/// Sparkline of `values` scaled to their own extent.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let (min, max) = extent(values);
    sparkline_range(values, width, min, max)
}

/// Sparkline of `values` scaled to `[min, max]`; values outside are clamped.
///
/// Curves drawn against the same range can be compared glyph by glyph.
pub fn sparkline_range(values: &[f64], width: usize, min: f64, max: f64) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let values = subsample(values, width);
    let range = max - min;
    if range.is_nan() || range <= f64::EPSILON {
        return SPARK_CHARS[4].to_string().repeat(values.len());
    }

    values
        .iter()
        .map(|v| {
            let normalized = (v.clamp(min, max) - min) / range;
            SPARK_CHARS[((normalized * 7.0).round() as usize).min(7)]
        })
        .collect()
}

/// Smallest and largest finite value, `(0, 0)` when there are none.
pub fn extent(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
