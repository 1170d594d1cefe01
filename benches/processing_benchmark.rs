use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_ingest::models::Observation;
use weather_ingest::processors::AggregateCalculator;
use weather_ingest::readers::parse_observation_line;

// Synthetic observation lines, every tenth one with a missing value
fn create_test_lines(days: usize) -> Vec<String> {
    let base_date = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap();

    (0..days)
        .map(|day| {
            let date = base_date + chrono::Duration::days(day as i64);
            let max_temp = 150 + (day % 100) as i32;
            let precipitation = if day % 10 == 0 { -9999 } else { (day % 37) as i32 };
            format!(
                "{}\t{}\t{}\t{}",
                date.format("%Y%m%d"),
                max_temp,
                max_temp - 120,
                precipitation
            )
        })
        .collect()
}

fn create_test_observations(station_count: usize, days: usize) -> Vec<Observation> {
    let lines = create_test_lines(days);
    let mut observations = Vec::with_capacity(station_count * days);

    for station in 0..station_count {
        let station_id = format!("USC{:08}", station);
        for line in &lines {
            if let Ok(reading) = parse_observation_line(line) {
                observations.push(reading.with_station(&station_id));
            }
        }
    }

    observations
}

fn benchmark_record_parser(c: &mut Criterion) {
    let lines = create_test_lines(10_000);

    c.bench_function("parse_10k_lines", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = black_box(parse_observation_line(black_box(line)));
            }
        })
    });
}

fn benchmark_aggregate_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_calculator");

    for station_count in [10, 100].iter() {
        let observations = create_test_observations(*station_count, 3650);

        group.bench_with_input(
            BenchmarkId::new("stations", station_count),
            &observations,
            |b, observations| b.iter(|| AggregateCalculator::calculate(black_box(observations))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_record_parser, benchmark_aggregate_calculator);
criterion_main!(benches);
