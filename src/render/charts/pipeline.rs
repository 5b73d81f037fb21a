//! 08: flowchart of the processing stages, annotated with this run's numbers.

use crate::render::style::*;
use crate::render::style::DrawResult;
use crate::report::ClimateReport;
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1000;
const BOX_WIDTH: i32 = 560;
const BOX_HEIGHT: i32 = 84;
const GAP: i32 = 40;
const TOP: i32 = 110;

struct Stage {
    text: String,
    fill: RGBColor,
}

fn stages(report: &ClimateReport) -> Vec<Stage> {
    let endpoint = if report.is_hourly() { "hourly" } else { "daily" };
    let window_days = report.window.len();
    vec![
        Stage {
            text: format!("NASA POWER API\n{} endpoint, {}", endpoint, report.location.name),
            fill: RGBColor(0xe3, 0xf2, 0xfd),
        },
        Stage {
            text: format!(
                "Fetch {}-{}\n{} day window around {}",
                report.start_year,
                report.end_year,
                window_days,
                event_label(report)
            ),
            fill: RGBColor(0xe8, 0xea, 0xf6),
        },
        Stage {
            text: format!(
                "Drop missing readings (-999)\n{} usable years on the event date",
                report.total_years()
            ),
            fill: RGBColor(0xfc, 0xe4, 0xec),
        },
        Stage {
            text: format!(
                "Evaluate {} criteria per year\n{} ideal, {} failed",
                report.criteria.threshold_count(),
                report.evaluation.ideal_years,
                report.evaluation.failed_years()
            ),
            fill: RGBColor(0xe8, 0xf5, 0xe9),
        },
        Stage {
            text: format!(
                "Calculate probabilities\n{:.1}% overall, {}",
                report.probability(),
                report.level.label()
            ),
            fill: RGBColor(0xff, 0xf3, 0xe0),
        },
        Stage {
            text: format!(
                "Trend analysis (historical + recent)\n{} ({:+.1} points)",
                report.trend.direction, report.trend.difference
            ),
            fill: RGBColor(0xff, 0xf9, 0xe1),
        },
        Stage {
            text: format!(
                "Score alternative dates\n{} better day(s) found",
                report.alternatives.len()
            ),
            fill: RGBColor(0xf3, 0xe5, 0xf5),
        },
        Stage {
            text: "Render charts and export\nSVG, JSON, CSV".to_string(),
            fill: RGBColor(0xe0, 0xf7, 0xfa),
        },
    ]
}

pub fn draw(report: &ClimateReport, path: &Path) -> DrawResult {
    let stages = stages(report);
    let height = (TOP + stages.len() as i32 * (BOX_HEIGHT + GAP) + 20) as u32;
    let root = SVGBackend::new(path, (WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let center_x = WIDTH as i32 / 2;
    root.draw_text(
        "Processing pipeline",
        &centered(bold_font(30.0, &TEXT)),
        (center_x, 40),
    )?;
    root.draw_text(&subtitle(report), &centered(font(17.0)), (center_x, 75))?;

    let text_style = font(18.0);
    for (i, stage) in stages.iter().enumerate() {
        let top = TOP + i as i32 * (BOX_HEIGHT + GAP);
        let left = center_x - BOX_WIDTH / 2;
        let right = center_x + BOX_WIDTH / 2;

        root.draw(&Rectangle::new(
            [(left, top), (right, top + BOX_HEIGHT)],
            stage.fill.filled(),
        ))?;
        root.draw(&Rectangle::new(
            [(left, top), (right, top + BOX_HEIGHT)],
            TEXT.stroke_width(2),
        ))?;
        draw_centered_lines(&root, &stage.text, &text_style, (center_x, top + BOX_HEIGHT / 2), 26)?;

        if i + 1 < stages.len() {
            let start = top + BOX_HEIGHT;
            let end = start + GAP;
            root.draw(&PathElement::new(
                vec![(center_x, start + 4), (center_x, end - 12)],
                TEXT.stroke_width(3),
            ))?;
            root.draw(&Polygon::new(
                vec![(center_x - 9, end - 14), (center_x + 9, end - 14), (center_x, end - 2)],
                TEXT.filled(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}
