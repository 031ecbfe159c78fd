//! Softmax cross-entropy over class-index labels

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Row-wise softmax: exp(x_i - max) / sum(exp(x_j - max))
pub fn softmax_rows(logits: ArrayView2<'_, f32>) -> Array2<f32> {
    let mut probs = logits.to_owned();
    for mut row in probs.axis_iter_mut(Axis(0)) {
        let max = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max).exp());
        let sum: f32 = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    probs
}

/// Summed (not averaged) cross-entropy of `probs` against `labels`.
pub fn cross_entropy_sum(probs: ArrayView2<'_, f32>, labels: ArrayView1<'_, usize>) -> f64 {
    probs
        .axis_iter(Axis(0))
        .zip(labels.iter())
        .map(|(row, &label)| -f64::from(row[label].max(f32::MIN_POSITIVE)).ln())
        .sum()
}

/// Gradient of the mean cross-entropy with respect to the logits:
/// (softmax - onehot) / batch
pub fn cross_entropy_grad(probs: ArrayView2<'_, f32>, labels: ArrayView1<'_, usize>) -> Array2<f32> {
    let batch = probs.nrows().max(1) as f32;
    let mut grad = probs.to_owned();
    for (mut row, &label) in grad.axis_iter_mut(Axis(0)).zip(labels.iter()) {
        row[label] -= 1.0;
    }
    grad.mapv_inplace(|g| g / batch);
    grad
}

/// Index of the largest logit in each row.
pub fn argmax_rows(logits: ArrayView2<'_, f32>) -> Vec<usize> {
    logits
        .axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
                .0
        })
        .collect()
}
