//! 10: one-page summary with the headline probability and supporting facts.

use crate::render::style::*;
use crate::render::style::{DrawResult, BLUE, GREEN, RED};
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (1400, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Climate odds for {} | {}", event_label(report), report.location.name),
        bold_font(32.0, &TEXT),
    )?;

    let (upper, timeline) = root.split_vertically(640);
    let (cards_top, cards_bottom) = upper.split_vertically(360);
    let top = cards_top.split_evenly((1, 3));
    let bottom = cards_bottom.split_evenly((1, 2));

    probability_card(&top[0], report)?;
    temperature_card(&top[1], report)?;
    rain_card(&top[2], report)?;
    wind_card(&bottom[0], report)?;
    suggestion_card(&bottom[1], report)?;
    timeline_strip(&timeline, report)?;

    root.present()?;
    Ok(())
}

fn card(area: &Area<'_>, title: &str) -> Result<(i32, i32), Box<dyn std::error::Error + Send + Sync>> {
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);
    area.draw(&Rectangle::new(
        [(10, 10), (width - 10, height - 10)],
        LIGHT_GREY.filled(),
    ))?;
    area.draw_text(title, &centered(bold_font(20.0, &TEXT)), (width / 2, 36))?;
    Ok((width, height))
}

fn probability_card(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, height) = card(area, "Probability of ideal weather")?;
    let color = level_color(report.level);
    area.draw_text(
        &format!("{:.1}%", report.probability()),
        &centered(bold_font(72.0, &color)),
        (width / 2, height / 2),
    )?;
    area.draw_text(
        report.level.label(),
        &centered(bold_font(24.0, &color)),
        (width / 2, height / 2 + 70),
    )?;
    area.draw_text(
        &format!("{} of {} years", report.evaluation.ideal_years, report.total_years()),
        &centered(font(16.0)),
        (width / 2, height / 2 + 105),
    )?;
    Ok(())
}

fn temperature_card(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, height) = card(area, "Average temperature")?;
    let averages = &report.averages;
    if report.is_hourly() {
        area.draw_text(
            &format!("{:.1}°C", averages.temp_max),
            &centered(bold_font(60.0, &ORANGE)),
            (width / 2, height / 2),
        )?;
        area.draw_text(
            &format!("at {:02}:00", report.event.hour.unwrap_or_default()),
            &centered(font(18.0)),
            (width / 2, height / 2 + 60),
        )?;
    } else {
        area.draw_text(
            &format!("max {:.1}°C", averages.temp_max),
            &centered(bold_font(40.0, &RED)),
            (width / 2, height / 2 - 25),
        )?;
        area.draw_text(
            &format!("min {:.1}°C", averages.temp_min),
            &centered(bold_font(40.0, &BLUE)),
            (width / 2, height / 2 + 35),
        )?;
    }
    area.draw_text(
        &format!(
            "Ideal range {:.0}-{:.0}°C",
            report.criteria.temp_min, report.criteria.temp_max
        ),
        &centered(font(16.0)),
        (width / 2, height - 45),
    )?;
    Ok(())
}

/// Filled pie wedge from `from` to `to` (fractions of a full turn, clockwise from 12 o'clock).
fn wedge(center: (i32, i32), radius: f64, from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = ((to - from) * 64.0).ceil().max(1.0) as usize;
    let mut points = vec![center];
    points.extend((0..=steps).map(|i| {
        let turn = from + (to - from) * i as f64 / steps as f64;
        let angle = turn * 2.0 * PI;
        (
            center.0 + (radius * angle.sin()).round() as i32,
            center.1 - (radius * angle.cos()).round() as i32,
        )
    }));
    points
}

fn rain_card(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, height) = card(area, "Dry vs rainy years")?;
    let total = report.total_years().max(1) as f64;
    let dry = report.dry_years() as f64 / total;
    let center = (width / 2, height / 2 + 5);
    let radius = 95.0;

    if dry >= 1.0 || dry <= 0.0 {
        let color = if dry >= 1.0 { GREEN } else { RED };
        area.draw(&Circle::new(center, radius as i32, color.filled()))?;
    } else {
        area.draw(&Polygon::new(wedge(center, radius, 0.0, dry), GREEN.filled()))?;
        area.draw(&Polygon::new(wedge(center, radius, dry, 1.0), RED.filled()))?;
    }

    area.draw_text(
        &format!(
            "{} dry / {} rainy (limit {:.1} mm)",
            report.dry_years(),
            report.rainy_years,
            report.criteria.precipitation_max
        ),
        &centered(font(16.0)),
        (width / 2, height - 40),
    )?;
    Ok(())
}

fn wind_card(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, height) = card(area, "Wind safety")?;
    let total = report.total_years().max(1);
    let share = report.wind_safe_years as f64 / total as f64;

    area.draw_text(
        &format!("{} of {} years calm enough", report.wind_safe_years, report.total_years()),
        &centered(bold_font(24.0, &TEXT)),
        (width / 2, 95),
    )?;

    let (left, right) = (60, width - 60);
    let (bar_top, bar_bottom) = (height / 2, height / 2 + 36);
    area.draw(&Rectangle::new([(left, bar_top), (right, bar_bottom)], WHITE.filled()))?;
    let filled = left + ((right - left) as f64 * share).round() as i32;
    area.draw(&Rectangle::new([(left, bar_top), (filled, bar_bottom)], GREEN.filled()))?;
    area.draw(&Rectangle::new([(left, bar_top), (right, bar_bottom)], GREY.stroke_width(2)))?;

    area.draw_text(
        &format!(
            "Average {:.1} m/s, limit {:.1} m/s",
            report.averages.wind, report.criteria.wind_max
        ),
        &centered(font(16.0)),
        (width / 2, bar_bottom + 40),
    )?;
    Ok(())
}

fn suggestion_card(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, _) = card(area, "Better dates nearby")?;
    let line_style = font(17.0);

    if report.alternatives.is_empty() {
        area.draw_text(
            "No nearby date beats the event date",
            &centered(font(18.0)),
            (width / 2, 120),
        )?;
        return Ok(());
    }

    for (i, day) in report.alternatives.iter().enumerate() {
        let y = 85 + i as i32 * 36;
        area.draw(&Circle::new((50, y), 8, probability_color(day.probability).filled()))?;
        area.draw_text(
            &format!(
                "{}  {:.1}%  ({:+} days, {:+.1} points)",
                day.label(),
                day.probability,
                day.offset,
                day.probability - report.probability()
            ),
            &line_style,
            (70, y - 9),
        )?;
    }
    Ok(())
}

fn timeline_strip(area: &Area<'_>, report: &ClimateReport) -> DrawResult {
    let (width, height) = card(area, "Year by year")?;
    let verdicts = &report.evaluation.verdicts;
    if verdicts.is_empty() {
        return Ok(());
    }

    let slot = ((width - 80) / verdicts.len() as i32).max(1);
    let size = (slot - 8).clamp(4, 56);
    let top = height / 2 - size / 2;
    let label_style = centered(font(13.0));

    for (i, verdict) in verdicts.iter().enumerate() {
        let left = 40 + i as i32 * slot + (slot - size) / 2;
        let color = if verdict.ideal { GREEN } else { RED };
        area.draw(&Rectangle::new([(left, top), (left + size, top + size)], color.filled()))?;
        area.draw_text(
            &format!("{}", verdict.year),
            &label_style,
            (left + size / 2, top + size + 18),
        )?;
    }

    area.draw_text(
        &format!(
            "Green: ideal ({}) | Red: not ideal ({})",
            report.evaluation.ideal_years,
            report.evaluation.failed_years()
        ),
        &centered(font(15.0)),
        (width / 2, height - 30),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedge_starts_at_center_and_twelve_oclock() {
        let points = wedge((100, 100), 50.0, 0.0, 0.25);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (150, 100));
    }
}
