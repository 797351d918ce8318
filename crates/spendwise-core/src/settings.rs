use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_MONTHS: u32 = 6;
pub const DEFAULT_BILL_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_DUE_SOON_DAYS: u32 = 3;
pub const DEFAULT_DASHBOARD_BILL_LIMIT: usize = 3;
pub const DEFAULT_TOP_CATEGORY_LIMIT: usize = 5;

/// Longest trend the views accept.
pub const MAX_TREND_MONTHS: u32 = 24;
/// Upper bound for the bill horizon and the due-soon threshold.
pub const MAX_BILL_HORIZON_DAYS: u32 = 365;

/// Tunables for the dashboard and report views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationSettings {
    pub trend_months: u32,
    pub bill_horizon_days: u32,
    pub due_soon_days: u32,
    pub dashboard_bill_limit: usize,
    pub top_category_limit: usize,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            trend_months: DEFAULT_TREND_MONTHS,
            bill_horizon_days: DEFAULT_BILL_HORIZON_DAYS,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            dashboard_bill_limit: DEFAULT_DASHBOARD_BILL_LIMIT,
            top_category_limit: DEFAULT_TOP_CATEGORY_LIMIT,
        }
    }
}

impl AggregationSettings {
    /// Copy with every tunable pulled into its accepted range. Hand-edited config
    /// files can hold any value.
    pub fn bounded(self) -> Self {
        Self {
            trend_months: self.trend_months.clamp(1, MAX_TREND_MONTHS),
            bill_horizon_days: self.bill_horizon_days.min(MAX_BILL_HORIZON_DAYS),
            due_soon_days: self.due_soon_days.min(MAX_BILL_HORIZON_DAYS),
            ..self
        }
    }
}
