//! Income records as delivered by the record store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub source: String,
    #[serde(with = "crate::serde_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Income {
    pub fn new(amount: f64, source: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: new_record_id(),
            user_id: None,
            amount,
            source: source.into(),
            date,
            notes: None,
            created_at: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Identifiable for Income {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Income {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Income {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Displayable for Income {
    fn display_label(&self) -> String {
        self.source.clone()
    }
}
