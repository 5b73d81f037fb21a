//! 04: how many of the five criteria each year met, ideal years in green.

use crate::render::style::*;
use crate::render::style::{DrawResult, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::path::Path;

const CRITERIA_COUNT: f64 = 5.0;

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let evaluation = &report.evaluation;
    let x_range = year_range(report);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Criteria evaluation: {} ideal / {} failed ({:.1}%)",
                evaluation.ideal_years,
                evaluation.failed_years(),
                evaluation.probability
            ),
            font(26.0),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), 0.0..CRITERIA_COUNT + 0.8)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc("Criteria met (of 5)")
        .y_labels(6)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    let bar = |year: i32, met: f64, color: RGBColor| {
        let x = year as f64;
        Rectangle::new([(x - 0.38, 0.0), (x + 0.38, met)], color.filled())
    };

    chart
        .draw_series(
            evaluation
                .verdicts
                .iter()
                .filter(|v| v.ideal)
                .map(|v| bar(v.year, CRITERIA_COUNT, GREEN)),
        )?
        .label("Ideal")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], GREEN.filled()));
    chart
        .draw_series(
            evaluation
                .verdicts
                .iter()
                .filter(|v| !v.ideal)
                .map(|v| bar(v.year, CRITERIA_COUNT - v.violations.len() as f64, RED)),
        )?
        .label("Not ideal")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], RED.filled()));

    // Mark each failed year with its number of violations
    let marker = centered(font(13.0));
    chart.draw_series(evaluation.verdicts.iter().filter(|v| !v.ideal).map(|v| {
        let met = CRITERIA_COUNT - v.violations.len() as f64;
        Text::new(
            format!("-{}", v.violations.len()),
            (v.year as f64, met + 0.25),
            marker.clone(),
        )
    }))?;

    chart.draw_series(dashed_hline(x_range, CRITERIA_COUNT, TEXT.stroke_width(1), 40))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&GREY)
        .label_font(font(14.0))
        .draw()?;

    root.present()?;
    Ok(())
}
