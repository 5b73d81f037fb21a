//! Palette, fonts and small drawing helpers shared by every chart.

use crate::report::ClimateReport;
use crate::types::classification::ProbabilityLevel;
use crate::types::event_date::day_label;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

pub type DrawResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
pub type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub const FONT: &str = "sans-serif";

pub const RED: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const BLUE: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const GREEN: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
pub const ORANGE: RGBColor = RGBColor(0xf3, 0x9c, 0x12);
pub const DARK_ORANGE: RGBColor = RGBColor(0xe6, 0x7e, 0x22);
pub const DARK_RED: RGBColor = RGBColor(0xc0, 0x39, 0x2b);
pub const DARK_BLUE: RGBColor = RGBColor(0x29, 0x80, 0xb9);
pub const PURPLE: RGBColor = RGBColor(0x9b, 0x59, 0xb6);
pub const TEXT: RGBColor = RGBColor(0x2c, 0x3e, 0x50);
pub const GREY: RGBColor = RGBColor(0x7f, 0x8c, 0x8d);
pub const LIGHT_GREY: RGBColor = RGBColor(0xec, 0xf0, 0xf1);

pub fn level_color(level: ProbabilityLevel) -> RGBColor {
    match level {
        ProbabilityLevel::Excellent => GREEN,
        ProbabilityLevel::Good => BLUE,
        ProbabilityLevel::Moderate => ORANGE,
        ProbabilityLevel::Low => DARK_ORANGE,
        ProbabilityLevel::VeryLow => RED,
    }
}

pub fn probability_color(probability: f64) -> RGBColor {
    level_color(ProbabilityLevel::from_probability(probability))
}

pub fn font(size: f64) -> TextStyle<'static> {
    (FONT, size).into_font().color(&TEXT)
}

pub fn bold_font(size: f64, color: &RGBColor) -> TextStyle<'static> {
    (FONT, size, FontStyle::Bold).into_font().color(color)
}

pub fn centered(style: TextStyle<'static>) -> TextStyle<'static> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

/// Draws each `\n` separated line centred on `(x, y)`.
pub fn draw_centered_lines(
    area: &Area<'_>,
    text: &str,
    style: &TextStyle<'static>,
    (x, y): (i32, i32),
    line_height: i32,
) -> DrawResult {
    let lines: Vec<&str> = text.lines().collect();
    let first = y - line_height * (lines.len() as i32 - 1) / 2;
    let style = style.pos(Pos::new(HPos::Center, VPos::Center));
    for (i, line) in lines.iter().enumerate() {
        area.draw_text(line, &style, (x, first + i as i32 * line_height))?;
    }
    Ok(())
}

/// Min/max of `values`, padded by 10% of the span (or 1.0 when the span is zero).
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = if max > min { (max - min) * 0.1 } else { 1.0 };
    (min - pad)..(max + pad)
}

/// `0..max*1.15`, at least `0..1`.
pub fn zero_based_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    0.0..(max * 1.15).max(1.0)
}

/// Half a year of margin around the sampled years.
pub fn year_range(report: &ClimateReport) -> Range<f64> {
    let first = report
        .observations
        .first()
        .map_or(report.start_year, |o| o.year);
    let last = report
        .observations
        .last()
        .map_or(report.end_year, |o| o.year);
    (first as f64 - 0.5)..(last as f64 + 0.5)
}

/// Horizontal dashed line made of `dashes` segments, in chart coordinates.
pub fn dashed_hline(
    x: Range<f64>,
    y: f64,
    style: ShapeStyle,
    dashes: usize,
) -> Vec<PathElement<(f64, f64)>> {
    dashed_segments((x.start, y), (x.end, y), dashes)
        .into_iter()
        .map(|segment| PathElement::new(segment, style))
        .collect()
}

/// Vertical dashed line, in chart coordinates.
pub fn dashed_vline(
    x: f64,
    y: Range<f64>,
    style: ShapeStyle,
    dashes: usize,
) -> Vec<PathElement<(f64, f64)>> {
    dashed_segments((x, y.start), (x, y.end), dashes)
        .into_iter()
        .map(|segment| PathElement::new(segment, style))
        .collect()
}

fn dashed_segments(from: (f64, f64), to: (f64, f64), dashes: usize) -> Vec<Vec<(f64, f64)>> {
    let dashes = dashes.max(1);
    // Dash and gap have the same length
    let steps = (2 * dashes - 1) as f64;
    let point = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..dashes)
        .map(|i| {
            let start = (2 * i) as f64 / steps;
            let end = (2 * i + 1) as f64 / steps;
            vec![point(start), point(end)]
        })
        .collect()
}

/// `"Dec 20 at 14:00"`. The first day of a range.
pub fn event_label(report: &ClimateReport) -> String {
    format!(
        "{}{}",
        day_label(report.event.month, report.event.day),
        report.event.time_suffix()
    )
}

/// `"Rio de Janeiro, Brazil | Dec 20 | 2005-2024"`, used as a second title line.
/// Shows the whole range when several days are selected.
pub fn subtitle(report: &ClimateReport) -> String {
    format!(
        "{} | {}{} | {}-{}",
        report.location.name,
        report.event.label(),
        report.event.time_suffix(),
        report.start_year,
        report.end_year
    )
}

/// Outline of an annulus sector between two angles (radians), in pixel coordinates.
///
/// Angles follow the gauge convention: 0 points right, PI points left, y grows downwards.
pub fn ring_sector(
    center: (i32, i32),
    inner: f64,
    outer: f64,
    from: f64,
    to: f64,
) -> Vec<(i32, i32)> {
    const STEPS: usize = 32;
    let at = |radius: f64, angle: f64| {
        (
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 - (radius * angle.sin()).round() as i32,
        )
    };
    let angles: Vec<f64> = (0..=STEPS)
        .map(|i| from + (to - from) * i as f64 / STEPS as f64)
        .collect();
    let mut points: Vec<(i32, i32)> = angles.iter().map(|&a| at(outer, a)).collect();
    points.extend(angles.iter().rev().map(|&a| at(inner, a)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range([10.0, 20.0]);
        assert_eq!(range, 9.0..21.0);
        assert_eq!(padded_range([5.0, 5.0]), 4.0..6.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_zero_based_range() {
        assert_eq!(zero_based_range([0.0, 0.0]), 0.0..1.0);
        let range = zero_based_range([2.0, 10.0]);
        assert!((range.end - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_dashed_segments_cover_line() {
        let segments = dashed_segments((0.0, 0.0), (9.0, 0.0), 5);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0][0], (0.0, 0.0));
        assert!((segments[0][1].0 - 1.0).abs() < 1e-9);
        assert!((segments[4][0].0 - 8.0).abs() < 1e-9);
        assert!((segments[4][1].0 - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_sector_point_count() {
        let points = ring_sector((100, 100), 50.0, 80.0, std::f64::consts::PI, 0.0);
        assert_eq!(points.len(), 66);
        assert_eq!(points[0], (20, 100));
        assert_eq!(points[32], (180, 100));
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(probability_color(85.0), GREEN);
        assert_eq!(probability_color(10.0), RED);
    }
}
