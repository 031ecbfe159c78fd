//! End-of-run text: summary lines and loss/accuracy charts

use super::sparkline::{extent, sparkline_range};
use crate::prune::{EpochRecord, TrainReport};

/// Chart caption, e.g. `1024 units, 12.5% opt wts`.
pub fn caption(hidden_units: usize, report: &TrainReport) -> String {
    format!("{hidden_units} units, {:.1}% opt wts", 100.0 * report.best_fraction())
}

/// Best epoch and its active parameter count.
pub fn render_summary(report: &TrainReport) -> String {
    let best = &report.best;
    format!(
        "Best epoch: {} (test loss {:.4}, test acc {:.4})\nActive parameters: {} / {} ({:.1}%)",
        best.epoch,
        best.test.loss,
        best.test.accuracy,
        best.active,
        report.upper_bound,
        100.0 * report.best_fraction()
    )
}

fn chart(title: &str, caption: &str, series: [(&str, Vec<f64>); 2], width: usize) -> String {
    let (lo_a, hi_a) = extent(&series[0].1);
    let (lo_b, hi_b) = extent(&series[1].1);
    let (min, max) = (lo_a.min(lo_b), hi_a.max(hi_b));

    let mut out = format!("{title}: {caption}");
    for (label, values) in &series {
        let first = values.first().copied().unwrap_or_default();
        let last = values.last().copied().unwrap_or_default();
        out.push_str(&format!(
            "\n  {label:<10} {} {first:.4} -> {last:.4}",
            sparkline_range(values, width, min, max)
        ));
    }
    out
}

/// Loss and accuracy sparklines for train and test.
pub fn render_plots(report: &TrainReport, hidden_units: usize, width: usize) -> String {
    let caption = caption(hidden_units, report);
    let column = |f: &dyn Fn(&EpochRecord) -> f64| -> Vec<f64> { report.records.iter().map(f).collect() };
    let loss = chart(
        "loss",
        &caption,
        [("train_loss", column(&|r| r.train.loss)), ("test_loss", column(&|r| r.test.loss))],
        width,
    );
    let accuracy = chart(
        "accuracy",
        &caption,
        [("train_acc", column(&|r| r.train.accuracy)), ("test_acc", column(&|r| r.test.accuracy))],
        width,
    );
    format!("{loss}\n{accuracy}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::Evaluation;

    fn report() -> TrainReport {
        let records: Vec<EpochRecord> = [(0.9, 300), (0.5, 180), (0.6, 120)]
            .iter()
            .enumerate()
            .map(|(epoch, &(loss, active))| EpochRecord {
                epoch,
                active,
                upper_bound: 400,
                train: Evaluation { loss: loss - 0.1, accuracy: 1.0 - loss / 2.0 },
                test: Evaluation { loss, accuracy: 1.0 - loss / 2.0 },
                heldback: Evaluation::default(),
                keep_fraction: Some(0.4),
                zeta: None,
            })
            .collect();
        TrainReport {
            strategy: "occam".to_string(),
            upper_bound: 400,
            best: records[1].clone(),
            records,
        }
    }

    #[test]
    fn test_caption() {
        assert_eq!(caption(1024, &report()), "1024 units, 45.0% opt wts");
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&report());
        assert!(text.starts_with("Best epoch: 1"));
        assert!(text.contains("Active parameters: 180 / 400 (45.0%)"));
    }

    #[test]
    fn test_render_plots() {
        let text = render_plots(&report(), 64, 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "loss: 64 units, 45.0% opt wts");
        assert!(lines[1].trim_start().starts_with("train_loss"));
        assert!(lines[2].contains("0.9000 -> 0.6000"));
        assert!(lines[3].starts_with("accuracy:"));
    }
}
