use tracing::warn;

use spendwise_domain::Snapshot;

fn amount_warning(kind: &str, id: &str, amount: f64) -> Option<String> {
    if !amount.is_finite() {
        Some(format!("{kind} {id} has non-finite amount; counted as 0"))
    } else if amount < 0.0 {
        Some(format!("{kind} {id} has negative amount {amount}"))
    } else {
        None
    }
}

/// Detects anomalies within a snapshot. Aggregation still runs on such records.
pub fn snapshot_warnings(snapshot: &Snapshot) -> Vec<String> {
    let mut warnings = Vec::new();

    for expense in &snapshot.expenses {
        warnings.extend(amount_warning("expense", &expense.id, expense.amount));
        if expense.is_uncategorized() {
            warnings.push(format!(
                "expense {} has no category; grouped under `{}`",
                expense.id,
                expense.category_label()
            ));
        }
    }
    for income in &snapshot.income {
        warnings.extend(amount_warning("income", &income.id, income.amount));
    }
    for bill in &snapshot.bills {
        warnings.extend(amount_warning("bill", &bill.id, bill.amount));
        match (bill.paid, bill.paid_date) {
            (true, None) => warnings.push(format!("bill {} is paid but has no paid date", bill.id)),
            (false, Some(date)) => warnings.push(format!(
                "bill {} is unpaid but carries paid date {}",
                bill.id, date
            )),
            _ => {}
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendwise_domain::{Bill, Expense, Income};

    #[test]
    fn clean_snapshot_has_no_warnings() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let snapshot = Snapshot::new(
            vec![Expense::new(1.0, "Tea", "Food & Dining", day)],
            vec![Income::new(5.0, "Gift", day)],
            vec![Bill::new("Rent", 10.0, day).paid_on(day)],
        );
        assert!(snapshot_warnings(&snapshot).is_empty());
    }

    #[test]
    fn flags_each_anomaly() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut paid_without_date = Bill::new("Water", 10.0, day);
        paid_without_date.paid = true;
        let mut stale_paid_date = Bill::new("Power", 10.0, day);
        stale_paid_date.paid_date = Some(day);
        let snapshot = Snapshot::new(
            vec![Expense::new(-3.0, "Refund?", "", day)],
            vec![Income::new(f64::INFINITY, "Glitch", day)],
            vec![paid_without_date, stale_paid_date],
        );
        let warnings = snapshot_warnings(&snapshot);
        assert_eq!(warnings.len(), 5);
        assert!(warnings.iter().any(|w| w.contains("negative amount")));
        assert!(warnings.iter().any(|w| w.contains("no category")));
        assert!(warnings.iter().any(|w| w.contains("non-finite")));
        assert!(warnings.iter().any(|w| w.contains("no paid date")));
        assert!(warnings.iter().any(|w| w.contains("carries paid date")));
    }
}
