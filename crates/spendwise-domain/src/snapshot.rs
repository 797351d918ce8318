//! Immutable bundle of one user's records at a point in time.

use serde::{Deserialize, Serialize};

use crate::{bill::Bill, expense::Expense, income::Income};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub income: Vec<Income>,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl Snapshot {
    pub fn new(expenses: Vec<Expense>, income: Vec<Income>, bills: Vec<Bill>) -> Self {
        Self {
            expenses,
            income,
            bills,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.income.is_empty() && self.bills.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.expenses.len() + self.income.len() + self.bills.len()
    }
}
