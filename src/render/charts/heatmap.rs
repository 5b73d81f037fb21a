//! 06: odds for every day of the date window, selected days and best day highlighted.

use crate::render::style::*;
use crate::render::style::DrawResult;
use crate::report::ClimateReport;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const ROW_HEIGHT: u32 = 24;

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let window = &report.window;
    let height = (140 + ROW_HEIGHT * window.len() as u32).max(420);
    let root = SVGBackend::new(path, (1200, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!(
        "Odds of ideal weather around {} ({} days)",
        event_label(report),
        window.len()
    );

    if window.is_empty() {
        root.draw_text(&caption, &centered(font(26.0)), (600, 40))?;
        root.draw_text(
            "No usable readings around the event date",
            &centered(font(18.0)),
            (600, (height / 2) as i32),
        )?;
        root.present()?;
        return Ok(());
    }

    let rows = window.len();
    // First window day on top
    let row_of = |index: usize| (rows - 1 - index) as f64;
    let labels: Vec<String> = window.iter().map(|day| day.label()).collect();
    let best_offset = report.best_day.as_ref().map(|day| day.offset);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, font(26.0))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..110.0, -0.6..(rows as f64 - 0.4))?;

    let y_label = |y: &f64| {
        let row = y.round();
        if (y - row).abs() > 1e-6 || row < 0.0 || row as usize >= rows {
            return String::new();
        }
        labels[rows - 1 - row as usize].clone()
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Probability of ideal weather (%)")
        .y_labels(rows)
        .y_label_formatter(&y_label)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    chart.draw_series(window.iter().enumerate().map(|(i, day)| {
        let y = row_of(i);
        Rectangle::new(
            [(0.0, y - 0.38), (day.probability, y + 0.38)],
            probability_color(day.probability).mix(0.85).filled(),
        )
    }))?;

    chart
        .draw_series(
            window
                .iter()
                .enumerate()
                .filter(|(_, day)| day.selected)
                .map(|(i, day)| {
                    let y = row_of(i);
                    Rectangle::new(
                        [(0.0, y - 0.45), (day.probability.max(1.0), y + 0.45)],
                        TEXT.stroke_width(3),
                    )
                }),
        )?
        .label(if report.event.is_range() {
            "Selected days"
        } else {
            "Event date"
        })
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], TEXT.stroke_width(3)));

    chart
        .draw_series(
            window
                .iter()
                .enumerate()
                .filter(|(_, day)| Some(day.offset) == best_offset)
                .map(|(i, day)| {
                    let y = row_of(i);
                    Rectangle::new(
                        [(0.0, y - 0.45), (day.probability.max(1.0), y + 0.45)],
                        PURPLE.stroke_width(3),
                    )
                }),
        )?
        .label("Best day")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], PURPLE.stroke_width(3)));

    let value_style = font(12.0).pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(window.iter().enumerate().map(|(i, day)| {
        Text::new(
            format!("{:.0}% ({}/{})", day.probability, day.ideal_years, day.total_years),
            (day.probability + 1.0, row_of(i)),
            value_style.clone(),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&GREY)
        .label_font(font(14.0))
        .draw()?;

    root.present()?;
    Ok(())
}
