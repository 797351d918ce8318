//! Expense records as delivered by the record store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Label used for expenses whose category is missing or blank.
pub const UNCATEGORIZED_LABEL: &str = "Other";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "crate::serde_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_record_id(),
            user_id: None,
            amount,
            description: description.into(),
            category: category.into(),
            date,
            notes: None,
            created_at: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Category used for grouping. Exact string, except blank values fall back to
    /// [`UNCATEGORIZED_LABEL`].
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED_LABEL
        } else {
            &self.category
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.trim().is_empty()
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({})", self.description, self.category_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_amount_and_category_deserialize_to_defaults() {
        let expense: Expense =
            serde_json::from_str(r#"{"id":"e1","description":"Coffee","date":"2024-02-01"}"#)
                .expect("parse expense");
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.category_label(), UNCATEGORIZED_LABEL);
        assert!(expense.is_uncategorized());
    }

    #[test]
    fn store_field_names_are_camel_case() {
        let expense: Expense = serde_json::from_str(
            r#"{"id":"e2","userId":"u1","amount":12.5,"description":"Bus","category":"Transportation",
                "date":"2024-02-01T18:00:00.000Z","createdAt":"2024-02-01T18:00:05Z"}"#,
        )
        .expect("parse expense");
        assert_eq!(expense.user_id.as_deref(), Some("u1"));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(expense.created_at.is_some());
    }
}
