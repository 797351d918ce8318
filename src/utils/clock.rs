use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};

use spendwise_core::Clock;

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a calendar date, used by tests and by `SPENDWISE_TODAY`.
#[derive(Debug)]
pub struct FixedClock {
    date: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: RwLock::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        let mut guard = self
            .date
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = date;
    }

    fn date(&self) -> NaiveDate {
        *self
            .date
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.date()
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
            .and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.date()
    }
}
