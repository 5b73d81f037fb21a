//! 03: 2x2 panels of temperature, precipitation, wind and humidity.

use crate::render::style::*;
use crate::render::style::{DrawResult, BLUE, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

struct Series {
    label: String,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

struct Panel {
    title: String,
    y_desc: &'static str,
    series: Vec<Series>,
    limits: Vec<(f64, RGBColor)>,
    bars: bool,
}

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1400, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Weather parameters on {} | {}", event_label(report), report.location.name),
        font(28.0),
    )?;

    let x_range = year_range(report);
    let points = |field: fn(&crate::types::observation::Observation) -> f64| {
        report
            .observations
            .iter()
            .map(|o| (o.year as f64, field(o)))
            .collect::<Vec<_>>()
    };
    let criteria = &report.criteria;
    let averages = &report.averages;

    let temperature_series = if report.is_hourly() {
        vec![Series {
            label: format!("Temperature{}", report.event.time_suffix()),
            color: ORANGE,
            points: points(|o| o.temp_max),
        }]
    } else {
        vec![
            Series {
                label: "Maximum".to_string(),
                color: RED,
                points: points(|o| o.temp_max),
            },
            Series {
                label: "Minimum".to_string(),
                color: BLUE,
                points: points(|o| o.temp_min),
            },
        ]
    };

    let panels = [
        Panel {
            title: format!(
                "Temperature (avg max {:.1}°C, avg min {:.1}°C)",
                averages.temp_max, averages.temp_min
            ),
            y_desc: "°C",
            series: temperature_series,
            limits: vec![(criteria.temp_max, DARK_RED), (criteria.temp_min, DARK_BLUE)],
            bars: false,
        },
        Panel {
            title: format!("Precipitation (avg {:.2} mm)", averages.precipitation),
            y_desc: "mm",
            series: vec![Series {
                label: "Precipitation".to_string(),
                color: BLUE,
                points: points(|o| o.precipitation),
            }],
            limits: [Some(criteria.precipitation_max), criteria.precipitation_min]
                .into_iter()
                .flatten()
                .map(|limit| (limit, TEXT))
                .collect(),
            bars: true,
        },
        Panel {
            title: format!("Wind speed at 10 m (avg {:.1} m/s)", averages.wind),
            y_desc: "m/s",
            series: vec![Series {
                label: "Wind".to_string(),
                color: GREEN,
                points: points(|o| o.wind),
            }],
            limits: vec![(criteria.wind_max, TEXT)],
            bars: false,
        },
        Panel {
            title: format!("Relative humidity (avg {:.0}%)", averages.humidity),
            y_desc: "%",
            series: vec![Series {
                label: "Humidity".to_string(),
                color: PURPLE,
                points: points(|o| o.humidity),
            }],
            limits: [Some(criteria.humidity_max), criteria.humidity_min]
                .into_iter()
                .flatten()
                .map(|limit| (limit, TEXT))
                .collect(),
            bars: false,
        },
    ];

    for (area, panel) in root.split_evenly((2, 2)).iter().zip(panels) {
        draw_panel(area, panel, x_range.clone())?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(area: &Area<'_>, panel: Panel, x_range: Range<f64>) -> DrawResult {
    let values = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .chain(panel.limits.iter().map(|&(limit, _)| limit));
    let y_range = if panel.bars {
        zero_based_range(values)
    } else {
        padded_range(values)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, font(18.0))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .y_desc(panel.y_desc)
        .x_labels(6)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    for series in &panel.series {
        let color = series.color;
        if panel.bars {
            chart.draw_series(series.points.iter().map(|&(x, y)| {
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, y)], color.mix(0.8).filled())
            }))?;
        } else {
            chart.draw_series(LineSeries::new(series.points.iter().copied(), color.stroke_width(2)))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
            chart.draw_series(
                series
                    .points
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )?;
        }
    }

    for &(limit, color) in &panel.limits {
        chart.draw_series(dashed_hline(x_range.clone(), limit, color.stroke_width(2), 24))?;
    }

    if panel.series.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.85))
            .border_style(&GREY)
            .label_font(font(12.0))
            .draw()?;
    }
    Ok(())
}
