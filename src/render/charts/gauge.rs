//! 05: semicircular gauge with the five probability bands.

use crate::render::style::*;
use crate::render::style::DrawResult;
use crate::report::ClimateReport;
use crate::types::classification::ProbabilityLevel;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 680;
const CENTER: (i32, i32) = (500, 470);
const OUTER: f64 = 330.0;
const INNER: f64 = 210.0;

/// Gauge angle for a percentage: 0% points left, 100% points right.
fn angle(probability: f64) -> f64 {
    PI * (1.0 - probability.clamp(0.0, 100.0) / 100.0)
}

fn polar(radius: f64, angle: f64) -> (i32, i32) {
    (
        CENTER.0 + (radius * angle.cos()).round() as i32,
        CENTER.1 - (radius * angle.sin()).round() as i32,
    )
}

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    root.draw_text(
        &format!("Probability of ideal weather on {}", event_label(report)),
        &centered(bold_font(28.0, &TEXT)),
        (WIDTH as i32 / 2, 40),
    )?;
    root.draw_text(
        &subtitle(report),
        &centered(font(18.0)),
        (WIDTH as i32 / 2, 75),
    )?;

    // Bands, lowest first: 0-20 very low ... 80-100 excellent
    for (i, level) in ProbabilityLevel::ALL.iter().rev().enumerate() {
        let from = i as f64 * 20.0;
        let to = from + 20.0;
        root.draw(&Polygon::new(
            ring_sector(CENTER, INNER, OUTER, angle(from), angle(to)),
            level_color(*level).mix(0.85).filled(),
        ))?;
        let (x, y) = polar((INNER + OUTER) / 2.0, angle(from + 10.0));
        root.draw_text(
            level.label(),
            &centered(bold_font(15.0, &WHITE)),
            (x, y),
        )?;
    }

    for tick in (0..=100).step_by(20) {
        let a = angle(tick as f64);
        root.draw(&PathElement::new(
            vec![polar(OUTER, a), polar(OUTER + 12.0, a)],
            TEXT.stroke_width(2),
        ))?;
        root.draw_text(
            &format!("{}%", tick),
            &centered(font(16.0)),
            polar(OUTER + 32.0, a),
        )?;
    }

    let probability = report.probability();
    let needle = angle(probability);
    root.draw(&PathElement::new(
        vec![CENTER, polar(OUTER - 15.0, needle)],
        TEXT.stroke_width(6),
    ))?;
    root.draw(&Circle::new(CENTER, 14, TEXT.filled()))?;

    let color = level_color(report.level);
    root.draw_text(
        &format!("{:.1}%", probability),
        &centered(bold_font(54.0, &color)),
        (CENTER.0, CENTER.1 + 70),
    )?;
    root.draw_text(
        &format!(
            "{} | {} of {} years ideal",
            report.level.label(),
            report.evaluation.ideal_years,
            report.total_years()
        ),
        &centered(font(20.0)),
        (CENTER.0, CENTER.1 + 125),
    )?;
    root.draw_text(
        report.level.advice(),
        &centered(font(16.0)),
        (CENTER.0, CENTER.1 + 160),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_endpoints() {
        assert!((angle(0.0) - PI).abs() < 1e-12);
        assert!(angle(100.0).abs() < 1e-12);
        assert!((angle(50.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(angle(150.0), angle(100.0));
    }

    #[test]
    fn test_polar_points_up_at_half() {
        assert_eq!(polar(100.0, PI / 2.0), (CENTER.0, CENTER.1 - 100));
    }
}
