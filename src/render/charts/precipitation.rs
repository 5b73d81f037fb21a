//! 02: precipitation per year against the rain limit.

use crate::render::style::*;
use crate::render::style::{DrawResult, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::path::Path;

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let observations = &report.observations;
    let limit = report.criteria.precipitation_max;
    let x_range = year_range(report);
    let y_range = zero_based_range(observations.iter().map(|o| o.precipitation).chain([limit]));
    let unit = if report.is_hourly() { "mm/h" } else { "mm/day" };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Precipitation on {}: {} of {} years within {:.1} {}",
                event_label(report),
                report.dry_years(),
                report.total_years(),
                limit,
                unit
            ),
            font(26.0),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc(format!("Precipitation ({})", unit))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    let bar = |year: i32, value: f64, color: RGBColor| {
        let x = year as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, value)], color.filled())
    };

    chart
        .draw_series(
            observations
                .iter()
                .filter(|o| o.precipitation <= limit)
                .map(|o| bar(o.year, o.precipitation, GREEN)),
        )?
        .label("Within limit")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], GREEN.filled()));
    chart
        .draw_series(
            observations
                .iter()
                .filter(|o| o.precipitation > limit)
                .map(|o| bar(o.year, o.precipitation, RED)),
        )?
        .label("Above limit")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], RED.filled()));

    chart
        .draw_series(dashed_hline(x_range, limit, TEXT.stroke_width(2), 30))?
        .label(format!("Limit ({:.1} {})", limit, unit))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TEXT.stroke_width(2)));

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
