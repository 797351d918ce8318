//! Case-insensitive list filters behind the search bars.

use spendwise_domain::{Bill, Expense, Income};

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub struct SearchService;

impl SearchService {
    /// Expenses whose description or category contains `query`.
    pub fn expenses<'a>(expenses: &'a [Expense], query: &str) -> Vec<&'a Expense> {
        let needle = query.trim().to_lowercase();
        expenses
            .iter()
            .filter(|expense| {
                matches(&expense.description, &needle) || matches(&expense.category, &needle)
            })
            .collect()
    }

    /// Income entries whose source contains `query`.
    pub fn income<'a>(income: &'a [Income], query: &str) -> Vec<&'a Income> {
        let needle = query.trim().to_lowercase();
        income
            .iter()
            .filter(|entry| matches(&entry.source, &needle))
            .collect()
    }

    /// Bills whose name contains `query`.
    pub fn bills<'a>(bills: &'a [Bill], query: &str) -> Vec<&'a Bill> {
        let needle = query.trim().to_lowercase();
        bills
            .iter()
            .filter(|bill| matches(&bill.name, &needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn expense_search_checks_description_and_category() {
        let expenses = vec![
            Expense::new(4.0, "Latte", "Food & Dining", day()),
            Expense::new(30.0, "Train", "Transportation", day()),
        ];
        assert_eq!(SearchService::expenses(&expenses, "LATTE").len(), 1);
        assert_eq!(SearchService::expenses(&expenses, "transport").len(), 1);
        assert_eq!(SearchService::expenses(&expenses, "").len(), 2);
    }

    #[test]
    fn income_and_bill_search() {
        let income = vec![Income::new(10.0, "Freelance Work", day())];
        let bills = vec![Bill::new("Electricity", 60.0, day())];
        assert_eq!(SearchService::income(&income, "free").len(), 1);
        assert!(SearchService::bills(&bills, "water").is_empty());
    }
}
