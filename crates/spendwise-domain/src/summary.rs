//! Derived, view-ready summaries. Recomputed from a snapshot on every call.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{bill::Bill, window::DateWindow};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Income, expenses and balance for one window.
pub struct PeriodSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

impl PeriodSummary {
    pub fn from_totals(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    /// Componentwise sum, used when combining disjoint windows.
    pub fn combine(&self, other: &PeriodSummary) -> Self {
        Self::from_totals(
            self.total_income + other.total_income,
            self.total_expenses + other.total_expenses,
        )
    }

    pub fn is_surplus(&self) -> bool {
        self.balance >= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Summed spending for one category, with its chart colour.
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One month of a trailing income/expense series.
pub struct TrendPoint {
    pub label: String,
    pub window: DateWindow,
    pub expenses: f64,
    pub income: f64,
}

impl TrendPoint {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Reporting period offered by the reports view.
pub enum ReportPeriod {
    #[default]
    Month,
    Year,
}

impl ReportPeriod {
    /// Nominal day count used for the average daily spend statistic.
    pub fn nominal_days(self) -> u32 {
        match self {
            ReportPeriod::Month => 30,
            ReportPeriod::Year => 365,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" | "monthly" => Some(ReportPeriod::Month),
            "year" | "yearly" => Some(ReportPeriod::Year),
            _ => None,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportPeriod::Month => "This Month",
            ReportPeriod::Year => "This Year",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportStatistics {
    pub average_daily_spend: f64,
    pub transaction_count: usize,
    pub largest_expense: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Month overview: totals, category split and the next bills due.
pub struct DashboardSummary {
    pub reference: NaiveDate,
    pub window: DateWindow,
    pub summary: PeriodSummary,
    pub categories: Vec<CategoryTotal>,
    pub upcoming_bills: Vec<Bill>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Complete report for a month or a year.
pub struct ReportSummary {
    pub period: ReportPeriod,
    pub window: DateWindow,
    pub summary: PeriodSummary,
    pub categories: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
    pub statistics: ReportStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_is_income_minus_expenses() {
        let summary = PeriodSummary::from_totals(1000.0, 1250.5);
        assert_eq!(summary.balance, -250.5);
        assert!(!summary.is_surplus());
    }

    #[test]
    fn combine_adds_componentwise() {
        let a = PeriodSummary::from_totals(10.0, 4.0);
        let b = PeriodSummary::from_totals(5.0, 7.0);
        assert_eq!(a.combine(&b), PeriodSummary::from_totals(15.0, 11.0));
    }

    #[test]
    fn report_period_parses_aliases() {
        assert_eq!(ReportPeriod::parse("Year"), Some(ReportPeriod::Year));
        assert_eq!(ReportPeriod::parse("monthly"), Some(ReportPeriod::Month));
        assert_eq!(ReportPeriod::parse("week"), None);
    }
}
