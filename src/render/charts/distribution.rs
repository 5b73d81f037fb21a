//! 09: histogram of the window-day odds with a fitted normal curve.

use crate::analysis::summary::mean_and_std_dev;
use crate::render::style::*;
use crate::render::style::{DrawResult, BLUE, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

const BIN_WIDTH: f64 = 10.0;
const BINS: usize = 10;

/// Counts per 10-point bin. 100% falls into the last bin.
pub(crate) fn histogram(values: &[f64]) -> [usize; BINS] {
    let mut counts = [0; BINS];
    for value in values {
        let bin = ((value / BIN_WIDTH).floor().max(0.0) as usize).min(BINS - 1);
        counts[bin] += 1;
    }
    counts
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let values: Vec<f64> = report.window.iter().map(|day| day.probability).collect();
    let counts = histogram(&values);
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let stats = mean_and_std_dev(&values);
    let y_max = max_count as f64 + 1.5;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Distribution of odds across {} days around {}",
                values.len(),
                event_label(report)
            ),
            font(26.0),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..100.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Probability of ideal weather (%)")
        .y_desc("Number of days")
        .x_labels(11)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    chart
        .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
            let start = bin as f64 * BIN_WIDTH;
            Rectangle::new(
                [(start + 0.5, 0.0), (start + BIN_WIDTH - 0.5, count as f64)],
                BLUE.mix(0.7).filled(),
            )
        }))?
        .label("Days per 10% bin")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], BLUE.mix(0.7).filled()));

    if let Some((mean, std_dev)) = stats {
        if std_dev > 0.0 {
            let scale = values.len() as f64 * BIN_WIDTH;
            let curve: Vec<(f64, f64)> = (0..=200)
                .map(|i| {
                    let x = i as f64 * 0.5;
                    (x, (normal_pdf(x, mean, std_dev) * scale).min(y_max))
                })
                .collect();
            chart
                .draw_series(LineSeries::new(curve, DARK_ORANGE.stroke_width(3)))?
                .label(format!("Normal fit (sd {:.1})", std_dev))
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], DARK_ORANGE.stroke_width(3))
                });
        }
        chart
            .draw_series(dashed_vline(mean, 0.0..y_max, RED.stroke_width(2), 25))?
            .label(format!("Mean {:.1}%", mean))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    }

    chart
        .draw_series(dashed_vline(report.probability(), 0.0..y_max, GREEN.stroke_width(2), 25))?
        .label(format!("{}: {:.1}%", event_label(report), report.probability()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&GREY)
        .label_font(font(14.0))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins() {
        let counts = histogram(&[0.0, 5.0, 10.0, 55.0, 99.9, 100.0]);
        assert_eq!(counts, [2, 1, 0, 0, 0, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_normal_pdf_peak() {
        let peak = normal_pdf(50.0, 50.0, 10.0);
        assert!((peak - 1.0 / (10.0 * (2.0 * PI).sqrt())).abs() < 1e-12);
        assert!(normal_pdf(70.0, 50.0, 10.0) < peak);
    }
}
