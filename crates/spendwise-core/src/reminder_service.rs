//! Reminder schedules for bills and the monthly report. Delivery happens elsewhere.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use spendwise_domain::{shift_month, Bill, DateWindow};

use crate::format::CurrencyFormatter;

pub const BILL_REMINDER_TITLE: &str = "Bill Reminder";
pub const MONTHLY_REPORT_TITLE: &str = "Monthly Expense Report";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    pub title: String,
    pub body: String,
    pub fire_on: NaiveDate,
}

pub struct ReminderService;

impl ReminderService {
    /// Reminder for the day before the due date. None when the bill is paid,
    /// reminders are off, or the due date is the first representable day.
    pub fn bill_reminder(bill: &Bill, formatter: &dyn CurrencyFormatter) -> Option<Reminder> {
        if bill.paid || !bill.reminder_enabled {
            return None;
        }
        let fire_on = bill.due_date.checked_sub_signed(Duration::days(1))?;
        Some(Reminder {
            bill_id: Some(bill.id.clone()),
            title: BILL_REMINDER_TITLE.to_string(),
            body: format!(
                "{} is due tomorrow - {}",
                bill.name,
                formatter.format_amount(bill.amount)
            ),
            fire_on,
        })
    }

    /// Bill reminders that have not fired yet as of `reference`, in bill order.
    pub fn pending_bill_reminders(
        bills: &[Bill],
        reference: NaiveDate,
        formatter: &dyn CurrencyFormatter,
    ) -> Vec<Reminder> {
        bills
            .iter()
            .filter_map(|bill| Self::bill_reminder(bill, formatter))
            .filter(|reminder| reminder.fire_on >= reference)
            .collect()
    }

    /// Monthly report reminder, fired on the first day of the month after `reference`.
    pub fn monthly_report(reference: NaiveDate) -> Reminder {
        let next_month = shift_month(DateWindow::month_of(reference).start, 1);
        Reminder {
            bill_id: None,
            title: MONTHLY_REPORT_TITLE.to_string(),
            body: "Your monthly expense report is ready!".to_string(),
            fire_on: next_month,
        }
    }
}
