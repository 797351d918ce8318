//! Upcoming bill selection and payment status classification.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use spendwise_domain::{Amounted, Bill, BillStatus};

/// Unsigned whole-day distance between two dates. Display text only; it cannot tell
/// an overdue bill from a future one.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Signed whole-day difference: positive when `due` is after `reference`.
pub fn days_until(reference: NaiveDate, due: NaiveDate) -> i64 {
    (due - reference).num_days()
}

pub struct BillService;

impl BillService {
    /// Unpaid bills due within `[reference, reference + horizon_days]`, in input order.
    ///
    /// The store delivers bills ordered by due date; that order is kept as-is. Use
    /// [`BillService::upcoming_sorted`] when the source ordering cannot be trusted.
    /// A horizon reaching past the last representable date has no upper bound.
    pub fn upcoming(bills: &[Bill], reference: NaiveDate, horizon_days: u32) -> Vec<Bill> {
        let horizon_end = reference
            .checked_add_signed(Duration::days(i64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        let upcoming: Vec<Bill> = bills
            .iter()
            .filter(|bill| !bill.paid && bill.due_date >= reference && bill.due_date <= horizon_end)
            .cloned()
            .collect();
        debug!(count = upcoming.len(), %reference, horizon_days, "selected upcoming bills");
        upcoming
    }

    /// Same selection as [`BillService::upcoming`], ordered by due date (stable).
    pub fn upcoming_sorted(bills: &[Bill], reference: NaiveDate, horizon_days: u32) -> Vec<Bill> {
        let mut upcoming = Self::upcoming(bills, reference, horizon_days);
        upcoming.sort_by_key(|bill| bill.due_date);
        upcoming
    }

    /// Unpaid bills due on or before `reference`.
    pub fn overdue(bills: &[Bill], reference: NaiveDate) -> Vec<Bill> {
        bills
            .iter()
            .filter(|bill| !bill.paid && days_until(reference, bill.due_date) <= 0)
            .cloned()
            .collect()
    }

    /// Classifies a bill with a signed day difference.
    ///
    /// Paid bills are always `Paid`. An unpaid bill due today or earlier is `Overdue`;
    /// one due within `due_soon_days` is `DueSoon`; anything later is `Upcoming`.
    pub fn status(bill: &Bill, reference: NaiveDate, due_soon_days: u32) -> BillStatus {
        if bill.paid {
            return BillStatus::Paid;
        }
        let days = days_until(reference, bill.due_date);
        if days <= 0 {
            BillStatus::Overdue { days_overdue: -days }
        } else if days <= i64::from(due_soon_days) {
            BillStatus::DueSoon { days }
        } else {
            BillStatus::Upcoming { days }
        }
    }

    /// "N days ago" / "in N days" style text built on the unsigned helper.
    pub fn relative_due_text(bill: &Bill, reference: NaiveDate) -> String {
        let distance = days_between(reference, bill.due_date);
        match days_until(reference, bill.due_date) {
            0 => "due today".to_string(),
            days if days > 0 => format!("in {distance} days"),
            _ => format!("{distance} days ago"),
        }
    }

    pub fn total_outstanding(bills: &[Bill]) -> f64 {
        bills
            .iter()
            .filter(|bill| !bill.paid)
            .map(Amounted::effective_amount)
            .sum()
    }
}
