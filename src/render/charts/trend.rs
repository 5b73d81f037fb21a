//! 07: historical versus recent odds, and the maximum temperature drift.

use crate::analysis::trend::{PeriodProbability, TrendDirection};
use crate::render::style::*;
use crate::render::style::{DrawResult, BLUE, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::path::Path;

fn direction_color(direction: TrendDirection) -> RGBColor {
    match direction {
        TrendDirection::Positive => GREEN,
        TrendDirection::Negative => RED,
        TrendDirection::Stable => BLUE,
    }
}

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1400, 650)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(560);

    draw_periods(&left, report)?;
    draw_temperature(&right, report)?;

    root.present()?;
    Ok(())
}

fn draw_periods(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let trend = &report.trend;
    let mut chart = ChartBuilder::on(area)
        .caption("Historical vs recent odds", font(22.0))
        .margin(20)
        .x_label_area_size(20)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.6..1.6, 0.0..115.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Probability of ideal weather (%)")
        .draw()?;

    let periods: [(&str, Option<&PeriodProbability>, RGBColor); 2] = [
        ("Historical", trend.historical.as_ref(), BLUE),
        ("Recent", trend.recent.as_ref(), ORANGE),
    ];

    let label_style = centered(font(15.0));
    for (i, (name, period, color)) in periods.into_iter().enumerate() {
        let x = i as f64;
        let (probability, range, counts) = match period {
            Some(period) => (
                period.probability,
                period.label(),
                format!("{:.1}% ({}/{})", period.probability, period.ideal_years, period.total_years),
            ),
            None => (0.0, "no data".to_string(), String::new()),
        };
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, 0.0), (x + 0.3, probability)],
            color.mix(0.85).filled(),
        )))?;
        chart.draw_series([
            Text::new(counts, (x, probability + 5.0), label_style.clone()),
            Text::new(format!("{} {}", name, range), (x, probability + 11.0), label_style.clone()),
        ])?;
    }
    Ok(())
}

fn draw_temperature(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let trend = &report.trend;
    let observations = &report.observations;
    let color = direction_color(trend.direction);
    let x_range = year_range(report);

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!(
                "Climate trend: {} (difference {:+.1} points)",
                trend.direction, trend.difference
            ),
            font(22.0),
        )
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(
            x_range.clone(),
            padded_range(observations.iter().map(|o| o.temp_max)),
        )?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Maximum temperature (°C)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            observations.iter().map(|o| (o.year as f64, o.temp_max)),
            color.stroke_width(2),
        ))?
        .label("Maximum temperature")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    chart.draw_series(
        observations
            .iter()
            .map(|o| Circle::new((o.year as f64, o.temp_max), 4, color.filled())),
    )?;

    if let (Some(slope), Some(first), Some(last)) = (
        trend.temp_max_slope,
        observations.first(),
        observations.last(),
    ) {
        let line: Vec<(f64, f64)> = [first.year, last.year]
            .into_iter()
            .filter_map(|year| Some((year as f64, trend.fitted_temp_max(year)?)))
            .collect();
        chart
            .draw_series(LineSeries::new(line, PURPLE.stroke_width(3)))?
            .label(format!("Trend line ({:+.3}°C/year)", slope))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PURPLE.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&GREY)
        .label_font(font(14.0))
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_colors() {
        assert_eq!(direction_color(TrendDirection::Positive), GREEN);
        assert_eq!(direction_color(TrendDirection::Negative), RED);
        assert_eq!(direction_color(TrendDirection::Stable), BLUE);
    }
}
