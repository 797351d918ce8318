//! Text views over engine output. Every function returns lines; printing is
//! left to the caller.

use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use spendwise_core::{BillService, CategoryService, CurrencyFormatter, Reminder, TrendService};
use spendwise_domain::{
    Bill, BillStatus, CategoryTotal, DashboardSummary, Expense, Income, PeriodSummary,
    ReportSummary, TrendPoint,
};

use crate::cli::output::paint;
use crate::currency::{calculate_percentage, format_date};

const SWATCH: &str = "■";

pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn summary_lines(summary: &PeriodSummary, formatter: &dyn CurrencyFormatter) -> Vec<String> {
    let balance = formatter.format_amount(summary.balance);
    let balance = if summary.is_surplus() {
        balance.green().to_string()
    } else {
        balance.red().to_string()
    };
    vec![
        format!("  {:<10} {}", "Income", formatter.format_amount(summary.total_income)),
        format!("  {:<10} {}", "Expenses", formatter.format_amount(summary.total_expenses)),
        format!("  {:<10} {}", "Balance", balance),
    ]
}

pub fn category_lines(
    categories: &[CategoryTotal],
    formatter: &dyn CurrencyFormatter,
) -> Vec<String> {
    if categories.is_empty() {
        return vec!["  No expenses in this period.".to_string()];
    }
    let total: f64 = categories.iter().map(|entry| entry.amount).sum();
    categories
        .iter()
        .map(|entry| {
            format!(
                "  {} {:<18} {:>12} {:>6}%  ({} {})",
                paint(SWATCH, &entry.color),
                entry.name,
                formatter.format_amount(entry.amount),
                calculate_percentage(entry.amount, total),
                entry.count,
                if entry.count == 1 { "expense" } else { "expenses" }
            )
        })
        .collect()
}

pub fn bill_line(
    bill: &Bill,
    status: &BillStatus,
    reference: NaiveDate,
    formatter: &dyn CurrencyFormatter,
) -> String {
    let timing = if bill.paid {
        bill.paid_date
            .map(|date| format!("paid {}", format_date(date)))
            .unwrap_or_else(|| "paid".to_string())
    } else {
        BillService::relative_due_text(bill, reference)
    };
    let recurring = if bill.recurring { " (recurring)" } else { "" };
    format!(
        "  {:<18} {:>12}  {:<13} {:<14} [{}]{}  #{}",
        bill.name,
        formatter.format_amount(bill.amount),
        format_date(bill.due_date),
        timing,
        paint(&status.to_string(), status.color()),
        recurring,
        bill.id
    )
}

pub fn dashboard_lines(
    dashboard: &DashboardSummary,
    due_soon_days: u32,
    formatter: &dyn CurrencyFormatter,
) -> Vec<String> {
    let mut lines = vec![format!("Dashboard for {}", month_title(dashboard.reference))];
    lines.extend(summary_lines(&dashboard.summary, formatter));
    lines.push("Spending by category".to_string());
    lines.extend(category_lines(&dashboard.categories, formatter));
    lines.push("Upcoming bills".to_string());
    if dashboard.upcoming_bills.is_empty() {
        lines.push("  No bills due soon.".to_string());
    }
    for bill in &dashboard.upcoming_bills {
        let status = BillService::status(bill, dashboard.reference, due_soon_days);
        lines.push(bill_line(bill, &status, dashboard.reference, formatter));
    }
    lines
}

pub fn trend_lines(trend: &[TrendPoint], formatter: &dyn CurrencyFormatter) -> Vec<String> {
    trend
        .iter()
        .map(|point| {
            format!(
                "  {:<4} {:>7} income {:>12}  expenses {:>12}  net {:>12}",
                point.label,
                point.window.start.year(),
                formatter.format_amount(point.income),
                formatter.format_amount(point.expenses),
                formatter.format_amount(point.net())
            )
        })
        .collect()
}

pub fn report_lines(report: &ReportSummary, formatter: &dyn CurrencyFormatter) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} to {})",
        report.period,
        format_date(report.window.start),
        format_date(report.window.end)
    )];
    lines.extend(summary_lines(&report.summary, formatter));
    lines.push("Top categories".to_string());
    lines.extend(category_lines(&report.top_categories, formatter));
    if report.categories.len() > report.top_categories.len() {
        let hidden = report.categories.len() - report.top_categories.len();
        lines.push(format!("  ...and {hidden} more"));
    }
    lines.push("Monthly trend".to_string());
    lines.extend(trend_lines(&report.trend, formatter));
    lines.push("Statistics".to_string());
    let stats = &report.statistics;
    lines.push(format!(
        "  Average daily spend  {}",
        formatter.format_amount(stats.average_daily_spend)
    ));
    lines.push(format!("  Transactions         {}", stats.transaction_count));
    lines.push(format!(
        "  Largest expense      {}",
        formatter.format_amount(stats.largest_expense)
    ));
    if let Some(weakest) = TrendService::weakest_month(&report.trend) {
        lines.push(format!(
            "  Weakest month        {} {} (net {})",
            weakest.label,
            weakest.window.start.year(),
            formatter.format_amount(weakest.net())
        ));
    }
    lines
}

pub fn expense_line(expense: &Expense, formatter: &dyn CurrencyFormatter) -> String {
    format!(
        "  {:<13} {:<24} {} {:<16} {:>12}  #{}",
        format_date(expense.date),
        expense.description,
        paint(SWATCH, CategoryService::color_for(expense.category_label())),
        expense.category_label(),
        formatter.format_amount(expense.amount),
        expense.id
    )
}

pub fn income_line(income: &Income, formatter: &dyn CurrencyFormatter) -> String {
    format!(
        "  {:<13} {:<24} {:>12}  #{}",
        format_date(income.date),
        income.source,
        formatter.format_amount(income.amount),
        income.id
    )
}

pub fn reminder_line(reminder: &Reminder) -> String {
    format!(
        "  {:<13} {}: {}",
        format_date(reminder.fire_on),
        reminder.title,
        reminder.body
    )
}
