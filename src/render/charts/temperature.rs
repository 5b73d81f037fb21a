//! 01: temperature per year with the comfort band.

use crate::render::style::*;
use crate::render::style::{DrawResult, BLUE, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::path::Path;

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let observations = &report.observations;
    let criteria = &report.criteria;
    let x_range = year_range(report);
    let y_range = padded_range(
        observations
            .iter()
            .flat_map(|o| [o.temp_max, o.temp_min])
            .chain([criteria.temp_min, criteria.temp_max]),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Temperature on {} over {} years", event_label(report), report.total_years()),
            font(26.0),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(report.location.name.as_str())
        .y_desc("Temperature (°C)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    if report.is_hourly() {
        let label = format!("Temperature{}", report.event.time_suffix());
        chart
            .draw_series(LineSeries::new(
                observations.iter().map(|o| (o.year as f64, o.temp_max)),
                ORANGE.stroke_width(2),
            ))?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.stroke_width(2)));
        chart.draw_series(
            observations
                .iter()
                .map(|o| Circle::new((o.year as f64, o.temp_max), 4, ORANGE.filled())),
        )?;
    } else {
        chart
            .draw_series(LineSeries::new(
                observations.iter().map(|o| (o.year as f64, o.temp_max)),
                RED.stroke_width(2),
            ))?
            .label("Daily maximum")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
        chart.draw_series(
            observations
                .iter()
                .map(|o| Circle::new((o.year as f64, o.temp_max), 4, RED.filled())),
        )?;
        chart
            .draw_series(LineSeries::new(
                observations.iter().map(|o| (o.year as f64, o.temp_min)),
                BLUE.stroke_width(2),
            ))?
            .label("Daily minimum")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
        chart.draw_series(
            observations
                .iter()
                .map(|o| Circle::new((o.year as f64, o.temp_min), 4, BLUE.filled())),
        )?;
    }

    chart
        .draw_series(dashed_hline(x_range.clone(), criteria.temp_max, DARK_RED.stroke_width(2), 30))?
        .label(format!("Max limit ({:.1}°C)", criteria.temp_max))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_RED.stroke_width(2)));
    chart
        .draw_series(dashed_hline(x_range, criteria.temp_min, DARK_BLUE.stroke_width(2), 30))?
        .label(format!("Min limit ({:.1}°C)", criteria.temp_min))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_BLUE.stroke_width(2)));

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
