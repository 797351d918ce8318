//! Bills and their derived payment status.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(with = "crate::serde_date")]
    pub due_date: NaiveDate,
    #[serde(default, rename = "isRecurring")]
    pub recurring: bool,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default, rename = "isPaid")]
    pub paid: bool,
    #[serde(
        default,
        with = "crate::serde_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: f64, due_date: NaiveDate) -> Self {
        Self {
            id: new_record_id(),
            user_id: None,
            name: name.into(),
            amount,
            due_date,
            recurring: false,
            reminder_enabled: false,
            paid: false,
            paid_date: None,
            notes: None,
            created_at: None,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn with_reminder(mut self) -> Self {
        self.reminder_enabled = true;
        self
    }

    /// Marks the bill paid on `date`, keeping `paid` and `paid_date` in step.
    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.paid = true;
        self.paid_date = Some(date);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_date = None;
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.mark_paid(date);
        self
    }

    /// `paid_date` is present exactly when the bill is paid.
    pub fn has_consistent_paid_date(&self) -> bool {
        self.paid == self.paid_date.is_some()
    }
}

impl Identifiable for Bill {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Bill {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Bill {
    fn date(&self) -> NaiveDate {
        self.due_date
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!("{} (due {})", self.name, self.due_date)
    }
}

pub const PAID_COLOR: &str = "#27AE60";
pub const OVERDUE_COLOR: &str = "#E74C3C";
pub const DUE_SOON_COLOR: &str = "#F39C12";
pub const UPCOMING_COLOR: &str = "#3498DB";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Payment status of a bill relative to a reference date.
pub enum BillStatus {
    Paid,
    /// Due today or earlier. `days_overdue` is zero for a bill due today.
    Overdue { days_overdue: i64 },
    DueSoon { days: i64 },
    Upcoming { days: i64 },
}

impl BillStatus {
    pub fn color(&self) -> &'static str {
        match self {
            BillStatus::Paid => PAID_COLOR,
            BillStatus::Overdue { .. } => OVERDUE_COLOR,
            BillStatus::DueSoon { .. } => DUE_SOON_COLOR,
            BillStatus::Upcoming { .. } => UPCOMING_COLOR,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, BillStatus::Overdue { .. })
    }

    pub fn is_due_soon(&self) -> bool {
        matches!(self, BillStatus::DueSoon { .. })
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillStatus::Paid => f.write_str("Paid"),
            BillStatus::Overdue { .. } => f.write_str("Overdue"),
            BillStatus::DueSoon { days } | BillStatus::Upcoming { days } => {
                write!(f, "Due in {days} days")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_paid_keeps_paid_date_in_step() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut bill = Bill::new("Rent", 1200.0, due);
        assert!(bill.has_consistent_paid_date());

        bill.mark_paid(due);
        assert!(bill.paid);
        assert_eq!(bill.paid_date, Some(due));
        assert!(bill.has_consistent_paid_date());

        bill.mark_unpaid();
        assert!(!bill.paid);
        assert!(bill.paid_date.is_none());
    }

    #[test]
    fn deserializes_store_flags() {
        let bill: Bill = serde_json::from_str(
            r#"{"id":"b1","name":"Power","amount":80,"dueDate":"2024-03-12",
                "isRecurring":true,"reminderEnabled":true,"isPaid":true,
                "paidDate":"2024-03-11T09:00:00.000Z"}"#,
        )
        .expect("parse bill");
        assert!(bill.recurring);
        assert!(bill.reminder_enabled);
        assert!(bill.paid);
        assert_eq!(bill.paid_date, NaiveDate::from_ymd_opt(2024, 3, 11));
    }

    #[test]
    fn status_labels_match_cards() {
        assert_eq!(BillStatus::Paid.to_string(), "Paid");
        assert_eq!(BillStatus::Overdue { days_overdue: 4 }.to_string(), "Overdue");
        assert_eq!(BillStatus::DueSoon { days: 2 }.to_string(), "Due in 2 days");
        assert_eq!(BillStatus::Upcoming { days: 9 }.to_string(), "Due in 9 days");
        assert_eq!(BillStatus::DueSoon { days: 1 }.color(), DUE_SOON_COLOR);
    }
}
