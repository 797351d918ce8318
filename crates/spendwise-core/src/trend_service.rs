//! Month-over-month income and expense series.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use spendwise_domain::{month_label, shift_month, DateWindow, Expense, Income, TrendPoint};

use crate::{
    settings::MAX_TREND_MONTHS,
    summary_service::{calculate_total, within_window},
    CoreError,
};

pub struct TrendService;

impl TrendService {
    /// One point per month for the `month_count` months ending with the month of
    /// `reference`, oldest first. Returns an empty series when `month_count` is zero.
    /// Counts above [`MAX_TREND_MONTHS`] are capped.
    pub fn trailing_monthly_trend(
        expenses: &[Expense],
        income: &[Income],
        reference: NaiveDate,
        month_count: u32,
    ) -> Vec<TrendPoint> {
        let anchor = DateWindow::month_of(reference).start;
        let months = month_count.min(MAX_TREND_MONTHS) as i32;
        let points: Vec<TrendPoint> = (0..months)
            .rev()
            .map(|offset| {
                let month_start = shift_month(anchor, -offset);
                let window = DateWindow::month_of(month_start);
                TrendPoint {
                    label: month_label(month_start.month()).to_string(),
                    window,
                    expenses: calculate_total(within_window(expenses, window)),
                    income: calculate_total(within_window(income, window)),
                }
            })
            .collect();
        debug!(months = points.len(), %reference, "computed monthly trend");
        points
    }

    /// Like [`TrendService::trailing_monthly_trend`] but rejects counts outside
    /// `1..=MAX_TREND_MONTHS` instead of returning an empty or capped series.
    pub fn checked_trend(
        expenses: &[Expense],
        income: &[Income],
        reference: NaiveDate,
        month_count: u32,
    ) -> Result<Vec<TrendPoint>, CoreError> {
        if month_count == 0 {
            return Err(CoreError::InvalidParameter(
                "trend length must be at least one month".to_string(),
            ));
        }
        if month_count > MAX_TREND_MONTHS {
            return Err(CoreError::InvalidParameter(format!(
                "trend length must be at most {MAX_TREND_MONTHS} months"
            )));
        }
        Ok(Self::trailing_monthly_trend(
            expenses, income, reference, month_count,
        ))
    }

    /// Month whose net result (income minus expenses) is lowest.
    pub fn weakest_month(trend: &[TrendPoint]) -> Option<&TrendPoint> {
        trend
            .iter()
            .min_by(|a, b| a.net().total_cmp(&b.net()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn labels_run_oldest_first_across_year_boundary() {
        let trend = TrendService::trailing_monthly_trend(&[], &[], date(2024, 1, 15), 6);
        let labels: Vec<&str> = trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
        assert_eq!(trend[0].window.start, date(2023, 8, 1));
        assert_eq!(trend[5].window.end, date(2024, 1, 31));
    }

    #[test]
    fn sums_each_month_separately() {
        let expenses = vec![
            Expense::new(30.0, "Groceries", "Food", date(2024, 2, 29)),
            Expense::new(12.0, "Cinema", "Entertainment", date(2024, 3, 1)),
        ];
        let income = vec![Income::new(500.0, "Salary", date(2024, 3, 31))];
        let trend = TrendService::trailing_monthly_trend(&expenses, &income, date(2024, 3, 5), 2);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "Feb");
        assert_eq!(trend[0].expenses, 30.0);
        assert_eq!(trend[1].expenses, 12.0);
        assert_eq!(trend[1].income, 500.0);
        assert_eq!(
            TrendService::weakest_month(&trend).map(|p| p.label.as_str()),
            Some("Feb")
        );
    }

    #[test]
    fn zero_months_yields_empty_series() {
        assert!(TrendService::trailing_monthly_trend(&[], &[], date(2024, 3, 5), 0).is_empty());
    }

    #[test]
    fn oversized_counts_are_capped_or_rejected() {
        let reference = date(2024, 1, 15);
        let capped = TrendService::trailing_monthly_trend(&[], &[], reference, 3_000_000_000);
        assert_eq!(capped.len(), MAX_TREND_MONTHS as usize);
        assert_eq!(capped.last().map(|p| p.label.as_str()), Some("Jan"));

        for months in [25, i32::MAX as u32, 3_000_000_000, u32::MAX] {
            let err = TrendService::checked_trend(&[], &[], reference, months).unwrap_err();
            assert!(matches!(err, CoreError::InvalidParameter(_)));
        }
        assert_eq!(
            TrendService::checked_trend(&[], &[], reference, MAX_TREND_MONTHS)
                .unwrap()
                .len(),
            24
        );
    }

    #[test]
    fn checked_trend_rejects_zero_months() {
        let err = TrendService::checked_trend(&[], &[], date(2024, 1, 15), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)));
        assert_eq!(
            TrendService::checked_trend(&[], &[], date(2024, 1, 15), 2)
                .unwrap()
                .len(),
            2
        );
    }
}
