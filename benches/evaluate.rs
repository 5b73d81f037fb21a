use climate_odds::{
    evaluate, score_window, AnalysisSettings, ClimateHistory, ClimateReport, CriteriaSet,
    DayHistory, EventDate, LatLon, Location, Observation,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn observation(year: i32, offset: i64) -> Observation {
    let wobble = ((year as i64 * 7 + offset * 3) % 11) as f64;
    Observation {
        year,
        temp_max: 29.0 + wobble * 0.6,
        temp_min: 26.0 + wobble * 0.3,
        precipitation: wobble * 0.2,
        wind: 8.0 + wobble,
        humidity: 65.0 + wobble,
    }
}

fn history(window_days: i64) -> ClimateHistory {
    let date = EventDate::new(12, 20, None);
    let days = (-window_days..=window_days)
        .filter_map(|offset| {
            let (month, day) = date.shifted(offset)?;
            Some(DayHistory {
                offset,
                month,
                day,
                observations: (2005..=2024).map(|year| observation(year, offset)).collect(),
            })
        })
        .collect();
    ClimateHistory {
        location: LatLon(-22.9068, -43.1729),
        date,
        start_year: 2005,
        end_year: 2024,
        days,
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let criteria = CriteriaSet::default();
    let history = history(15);
    let target = history.target().to_vec();
    let settings = AnalysisSettings::default();
    let location = Location::default();

    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(&target), black_box(&criteria)))
    });
    c.bench_function("score_window", |b| {
        b.iter(|| score_window(black_box(&history), black_box(&criteria)))
    });
    c.bench_function("report_build", |b| {
        b.iter(|| ClimateReport::build(black_box(&history), &location, &criteria, &settings))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
