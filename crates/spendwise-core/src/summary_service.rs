//! Window totals and balance calculation.

use chrono::NaiveDate;
use tracing::debug;

use spendwise_domain::{
    Amounted, DateWindow, Dated, Expense, Income, PeriodSummary, ReportPeriod,
};

use crate::CoreError;

/// Records whose calendar date falls inside the closed window, in input order.
pub fn within_window<T: Dated>(records: &[T], window: DateWindow) -> impl Iterator<Item = &T> {
    records
        .iter()
        .filter(move |record| window.contains(record.date()))
}

/// Sum of effective amounts. Missing or non-finite amounts contribute zero.
pub fn calculate_total<'a, T, I>(records: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .map(|record| record.effective_amount())
        .sum()
}

pub struct SummaryService;

impl SummaryService {
    /// Totals for records inside `window` (both boundaries included).
    pub fn compute_period_summary(
        expenses: &[Expense],
        income: &[Income],
        window: DateWindow,
    ) -> PeriodSummary {
        let total_expenses = calculate_total(within_window(expenses, window));
        let total_income = calculate_total(within_window(income, window));
        let summary = PeriodSummary::from_totals(total_income, total_expenses);
        debug!(
            %window,
            total_income = summary.total_income,
            total_expenses = summary.total_expenses,
            "computed period summary"
        );
        summary
    }

    /// Like [`SummaryService::compute_period_summary`] but builds the window from raw
    /// bounds, rejecting `end < start`.
    pub fn summarize_between(
        expenses: &[Expense],
        income: &[Income],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodSummary, CoreError> {
        let window = DateWindow::new(start, end)?;
        Ok(Self::compute_period_summary(expenses, income, window))
    }

    pub fn month_window(reference: NaiveDate) -> DateWindow {
        DateWindow::month_of(reference)
    }

    pub fn year_window(reference: NaiveDate) -> DateWindow {
        DateWindow::year_of(reference)
    }

    /// Window a report covers for `period`.
    pub fn period_window(period: ReportPeriod, reference: NaiveDate) -> DateWindow {
        match period {
            ReportPeriod::Month => Self::month_window(reference),
            ReportPeriod::Year => Self::year_window(reference),
        }
    }

    /// Totals for the calendar month containing `reference`.
    pub fn summarize_month(
        expenses: &[Expense],
        income: &[Income],
        reference: NaiveDate,
    ) -> PeriodSummary {
        Self::compute_period_summary(expenses, income, Self::month_window(reference))
    }
}
