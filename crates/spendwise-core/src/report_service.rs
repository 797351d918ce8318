//! Dashboard and report views assembled from the individual aggregations.

use chrono::NaiveDate;
use tracing::debug;

use spendwise_domain::{
    Amounted, DashboardSummary, ReportPeriod, ReportStatistics, ReportSummary, Snapshot,
};

use crate::{
    bill_service::BillService,
    category_service::CategoryService,
    settings::AggregationSettings,
    summary_service::{within_window, SummaryService},
    trend_service::TrendService,
};

pub struct ReportService;

impl ReportService {
    /// Current-month overview for `reference`.
    pub fn dashboard(
        snapshot: &Snapshot,
        reference: NaiveDate,
        settings: &AggregationSettings,
    ) -> DashboardSummary {
        let window = SummaryService::month_window(reference);
        let summary =
            SummaryService::compute_period_summary(&snapshot.expenses, &snapshot.income, window);
        let month_expenses: Vec<_> = within_window(&snapshot.expenses, window)
            .cloned()
            .collect();
        let categories = CategoryService::breakdown(&month_expenses);
        let mut upcoming_bills =
            BillService::upcoming(&snapshot.bills, reference, settings.bill_horizon_days);
        upcoming_bills.truncate(settings.dashboard_bill_limit);

        DashboardSummary {
            reference,
            window,
            summary,
            categories,
            upcoming_bills,
        }
    }

    /// Month or year report. The trend always ends at the reference month.
    pub fn report(
        snapshot: &Snapshot,
        period: ReportPeriod,
        reference: NaiveDate,
        settings: &AggregationSettings,
    ) -> ReportSummary {
        let window = SummaryService::period_window(period, reference);
        let summary =
            SummaryService::compute_period_summary(&snapshot.expenses, &snapshot.income, window);
        let period_expenses: Vec<_> = within_window(&snapshot.expenses, window)
            .cloned()
            .collect();
        let period_income_count = within_window(&snapshot.income, window).count();
        let categories = CategoryService::breakdown(&period_expenses);
        let top_categories =
            CategoryService::top_categories(&categories, settings.top_category_limit);
        let trend = TrendService::trailing_monthly_trend(
            &snapshot.expenses,
            &snapshot.income,
            reference,
            settings.trend_months,
        );
        let largest_expense = period_expenses
            .iter()
            .map(Amounted::effective_amount)
            .fold(0.0_f64, f64::max);
        let statistics = ReportStatistics {
            average_daily_spend: summary.total_expenses / f64::from(period.nominal_days()),
            transaction_count: period_expenses.len() + period_income_count,
            largest_expense,
        };
        debug!(%period, %window, "assembled report");

        ReportSummary {
            period,
            window,
            summary,
            categories,
            top_categories,
            trend,
            statistics,
        }
    }
}
