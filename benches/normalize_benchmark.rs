use codetrail::models::TimezonePolicy;
use codetrail::services::{normalize, RawCalendar};
use chrono::FixedOffset;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Two years of daily activity starting 2024-01-01T00:00:00Z.
fn two_year_calendar() -> RawCalendar {
    (0..730u64)
        .map(|day| {
            let epoch = 1_704_067_200 + day * 86_400;
            (epoch.to_string(), serde_json::Value::from(day % 7 + 1))
        })
        .collect()
}

fn benchmark_normalize(c: &mut Criterion) {
    let raw = two_year_calendar();
    let pst = TimezonePolicy::Local(FixedOffset::west_opt(8 * 3600).expect("valid offset"));

    let mut group = c.benchmark_group("normalize_calendar");

    group.bench_function("two_years_utc", |b| {
        b.iter(|| normalize(black_box(&raw), TimezonePolicy::Utc))
    });

    group.bench_function("two_years_local", |b| {
        b.iter(|| normalize(black_box(&raw), pst))
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
