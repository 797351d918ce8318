use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spendwise_core::{AggregationSettings, CategoryService, ReportService, TrendService};
use spendwise_domain::{Bill, Expense, Income, ReportPeriod, Snapshot};

const CATEGORIES: [&str; 8] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "",
];

fn build_snapshot(record_count: usize) -> Snapshot {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let expenses = (0..record_count)
        .map(|idx| {
            Expense::new(
                5.0 + (idx % 200) as f64 * 1.25,
                format!("expense {idx}"),
                CATEGORIES[idx % CATEGORIES.len()],
                start + Duration::days((idx % 730) as i64),
            )
        })
        .collect();
    let income = (0..record_count / 10)
        .map(|idx| Income::new(1500.0, "Salary", start + Duration::days((idx % 730) as i64)))
        .collect();
    let bills = (0..record_count / 20)
        .map(|idx| Bill::new(format!("bill {idx}"), 80.0, start + Duration::days((idx % 730) as i64)))
        .collect();
    Snapshot::new(expenses, income, bills)
}

fn bench_aggregation(c: &mut Criterion) {
    let snapshot = build_snapshot(black_box(50_000));
    let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let settings = AggregationSettings::default();

    c.bench_function("dashboard_50k", |b| {
        b.iter(|| ReportService::dashboard(black_box(&snapshot), reference, &settings))
    });

    c.bench_function("year_report_50k", |b| {
        b.iter(|| {
            ReportService::report(black_box(&snapshot), ReportPeriod::Year, reference, &settings)
        })
    });

    c.bench_function("breakdown_50k", |b| {
        b.iter(|| CategoryService::breakdown(black_box(&snapshot.expenses)))
    });

    c.bench_function("trend_24_months_50k", |b| {
        b.iter(|| {
            TrendService::trailing_monthly_trend(
                black_box(&snapshot.expenses),
                black_box(&snapshot.income),
                reference,
                24,
            )
        })
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
