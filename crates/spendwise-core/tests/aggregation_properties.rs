use chrono::{Duration, NaiveDate};
use spendwise_core::{
    settings::MAX_TREND_MONTHS, BillService, CategoryService, CoreError, SummaryService,
    TrendService,
};
use spendwise_domain::{Bill, DateWindow, Expense, Income};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn period_summary_is_additive_over_disjoint_windows() {
    let start = date(2024, 1, 1);
    let expenses: Vec<Expense> = (0..60)
        .map(|idx| {
            Expense::new(
                (idx % 7) as f64 * 3.25,
                "item",
                "Shopping",
                start + Duration::days(idx),
            )
        })
        .collect();
    let income: Vec<Income> = (0..60)
        .step_by(5)
        .map(|idx| Income::new(100.0 + idx as f64, "Side job", start + Duration::days(idx)))
        .collect();

    let first = DateWindow::new(date(2024, 1, 1), date(2024, 1, 20)).unwrap();
    let second = DateWindow::new(date(2024, 1, 21), date(2024, 2, 29)).unwrap();
    let union = DateWindow::new(date(2024, 1, 1), date(2024, 2, 29)).unwrap();

    let a = SummaryService::compute_period_summary(&expenses, &income, first);
    let b = SummaryService::compute_period_summary(&expenses, &income, second);
    let whole = SummaryService::compute_period_summary(&expenses, &income, union);
    let combined = a.combine(&b);

    assert!((combined.total_income - whole.total_income).abs() < 1e-9);
    assert!((combined.total_expenses - whole.total_expenses).abs() < 1e-9);
    assert!((combined.balance - whole.balance).abs() < 1e-9);
}

#[test]
fn month_window_ends_on_last_day_for_every_month() {
    let expected_2023 = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (idx, last_day) in expected_2023.iter().enumerate() {
        let month = idx as u32 + 1;
        let window = SummaryService::month_window(date(2023, month, 10));
        assert_eq!(window.start, date(2023, month, 1));
        assert_eq!(window.end, date(2023, month, *last_day));
    }
    let leap = SummaryService::month_window(date(2024, 2, 3));
    assert_eq!(leap.end, date(2024, 2, 29));

    let december = SummaryService::month_window(date(2023, 12, 31));
    assert_eq!(december.start, date(2023, 12, 1));
    assert_eq!(december.end, date(2023, 12, 31));
}

#[test]
fn category_breakdown_preserves_first_seen_order() {
    let day = date(2024, 6, 1);
    let expenses = vec![
        Expense::new(1.0, "a1", "A", day),
        Expense::new(2.0, "b1", "B", day),
        Expense::new(4.0, "a2", "A", day),
        Expense::new(8.0, "c1", "C", day),
        Expense::new(16.0, "b2", "B", day),
    ];
    let breakdown = CategoryService::breakdown(&expenses);
    let names: Vec<&str> = breakdown.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    let amounts: Vec<f64> = breakdown.iter().map(|entry| entry.amount).collect();
    assert_eq!(amounts, [5.0, 18.0, 8.0]);
}

#[test]
fn six_month_trend_from_mid_january() {
    let trend = TrendService::trailing_monthly_trend(&[], &[], date(2024, 1, 15), 6);
    let labels: Vec<&str> = trend.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, ["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
    assert_eq!(trend[0].window.start, date(2023, 8, 1));
    assert_eq!(trend[4].window.end, date(2023, 12, 31));
    assert_eq!(trend[5].window.start, date(2024, 1, 1));
}

#[test]
fn upcoming_bills_use_closed_horizon() {
    let reference = date(2024, 3, 10);
    let bills = vec![
        Bill::new("Today", 10.0, date(2024, 3, 10)),
        Bill::new("Paid", 20.0, date(2024, 3, 12)).paid_on(date(2024, 3, 9)),
        Bill::new("Edge", 30.0, date(2024, 3, 17)),
        Bill::new("Beyond", 40.0, date(2024, 3, 18)),
        Bill::new("Past", 50.0, date(2024, 3, 9)),
    ];
    let upcoming = BillService::upcoming(&bills, reference, 7);
    let names: Vec<&str> = upcoming.iter().map(|bill| bill.name.as_str()).collect();
    assert_eq!(names, ["Today", "Edge"]);
}

#[test]
fn upcoming_bills_cross_the_year_end() {
    let reference = date(2024, 12, 28);
    let bills = vec![
        Bill::new("New year rent", 900.0, date(2025, 1, 4)),
        Bill::new("Too late", 60.0, date(2025, 1, 5)),
        Bill::new("Holiday card", 15.0, date(2024, 12, 31)),
    ];
    let upcoming = BillService::upcoming(&bills, reference, 7);
    let names: Vec<&str> = upcoming.iter().map(|bill| bill.name.as_str()).collect();
    assert_eq!(names, ["New year rent", "Holiday card"]);
}

#[test]
fn upcoming_bills_tolerate_extreme_horizons() {
    let reference = date(2024, 3, 10);
    let bills = vec![
        Bill::new("Tomorrow", 10.0, date(2024, 3, 11)),
        Bill::new("Decades away", 10.0, date(2099, 12, 31)),
    ];
    assert_eq!(BillService::upcoming(&bills, reference, u32::MAX).len(), 2);
    assert_eq!(BillService::upcoming_sorted(&bills, reference, u32::MAX).len(), 2);

    let only_today = BillService::upcoming(&bills, reference, 0);
    assert!(only_today.is_empty());
    let tomorrow = BillService::upcoming(&bills, date(2024, 3, 11), 0);
    assert_eq!(tomorrow.len(), 1);
}

#[test]
fn trend_rejects_out_of_range_month_counts() {
    let reference = date(2024, 1, 15);
    for months in [0, MAX_TREND_MONTHS + 1, 3_000_000_000, u32::MAX] {
        let result = TrendService::checked_trend(&[], &[], reference, months);
        assert!(
            matches!(result, Err(CoreError::InvalidParameter(_))),
            "{months} months should be rejected"
        );
    }
    let longest = TrendService::checked_trend(&[], &[], reference, MAX_TREND_MONTHS).unwrap();
    assert_eq!(longest.first().map(|p| p.window.start), Some(date(2022, 2, 1)));
}

#[test]
fn bill_status_classification() {
    let reference = date(2024, 3, 10);
    let soon = Bill::new("Soon", 10.0, date(2024, 3, 13));
    let late = Bill::new("Late", 10.0, date(2024, 3, 9));
    let paid = Bill::new("Paid", 10.0, date(2024, 1, 1)).paid_on(date(2024, 1, 1));

    assert_eq!(BillService::status(&soon, reference, 3).to_string(), "Due in 3 days");
    assert!(BillService::status(&soon, reference, 3).is_due_soon());
    assert_eq!(BillService::status(&late, reference, 3).to_string(), "Overdue");
    assert_eq!(BillService::status(&paid, reference, 3).to_string(), "Paid");
}
