//! Record store seam: the source of snapshots and the push channel to sessions.

pub mod json;

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::NaiveDate;
use tracing::debug;

use spendwise_domain::{Bill, Expense, Identifiable, Income, Snapshot};

use crate::errors::SpendwiseError;

pub use json::{load_snapshot_from_path, save_snapshot_to_path};

/// Callback receiving every snapshot a store publishes, with its revision.
///
/// Revisions grow by one per write. Listeners may be called from several threads
/// at once, so a delivery can arrive after a newer one; keep the highest revision.
pub type SnapshotListener = Box<dyn Fn(u64, &Snapshot) + Send + Sync>;

/// Supplies record snapshots for the signed-in user.
pub trait RecordStore: Send + Sync {
    /// Latest snapshot.
    fn snapshot(&self) -> Snapshot;

    /// Registers `listener`, calling it immediately with the current snapshot
    /// and again after every change. Dropping the handle unsubscribes.
    fn subscribe(&self, listener: SnapshotListener) -> Subscription;
}

/// Live subscription handle.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct StoreState {
    snapshot: Snapshot,
    revision: u64,
    listeners: Vec<(u64, Arc<SnapshotListener>)>,
    next_listener: u64,
}

/// Removes the record with `id`, keeping the order of the rest.
fn take_by_id<T: Identifiable>(records: &mut Vec<T>, id: &str) -> Option<T> {
    let position = records.iter().position(|record| record.id() == id)?;
    Some(records.remove(position))
}

/// Process-local store that pushes a fresh snapshot to listeners on every write.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        store.lock().snapshot = snapshot;
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Number of writes applied so far.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Replaces the whole snapshot and notifies listeners.
    pub fn publish(&self, snapshot: Snapshot) {
        self.apply(|current| {
            *current = snapshot;
            Some(())
        });
    }

    pub fn add_expense(&self, expense: Expense) {
        self.apply(|snapshot| {
            snapshot.expenses.push(expense);
            Some(())
        });
    }

    pub fn add_income(&self, income: Income) {
        self.apply(|snapshot| {
            snapshot.income.push(income);
            Some(())
        });
    }

    /// Bills are kept ordered by due date, as the backing query delivers them.
    pub fn add_bill(&self, bill: Bill) {
        self.apply(|snapshot| {
            let position = snapshot
                .bills
                .partition_point(|existing| existing.due_date <= bill.due_date);
            snapshot.bills.insert(position, bill);
            Some(())
        });
    }

    pub fn mark_bill_paid(&self, bill_id: &str, paid_on: NaiveDate) -> Result<Bill, SpendwiseError> {
        self.apply(|snapshot| {
            let bill = snapshot.bills.iter_mut().find(|bill| bill.id() == bill_id)?;
            bill.mark_paid(paid_on);
            Some(bill.clone())
        })
        .ok_or_else(|| SpendwiseError::RecordNotFound(format!("bill {bill_id}")))
    }

    /// Applies `change` to one expense and returns the updated record.
    pub fn update_expense(
        &self,
        expense_id: &str,
        change: impl FnOnce(&mut Expense),
    ) -> Result<Expense, SpendwiseError> {
        self.apply(|snapshot| {
            let expense = snapshot
                .expenses
                .iter_mut()
                .find(|expense| expense.id() == expense_id)?;
            change(expense);
            Some(expense.clone())
        })
        .ok_or_else(|| SpendwiseError::RecordNotFound(format!("expense {expense_id}")))
    }

    pub fn delete_expense(&self, expense_id: &str) -> Result<Expense, SpendwiseError> {
        self.apply(|snapshot| take_by_id(&mut snapshot.expenses, expense_id))
            .ok_or_else(|| SpendwiseError::RecordNotFound(format!("expense {expense_id}")))
    }

    pub fn delete_income(&self, income_id: &str) -> Result<Income, SpendwiseError> {
        self.apply(|snapshot| take_by_id(&mut snapshot.income, income_id))
            .ok_or_else(|| SpendwiseError::RecordNotFound(format!("income {income_id}")))
    }

    pub fn delete_bill(&self, bill_id: &str) -> Result<Bill, SpendwiseError> {
        self.apply(|snapshot| take_by_id(&mut snapshot.bills, bill_id))
            .ok_or_else(|| SpendwiseError::RecordNotFound(format!("bill {bill_id}")))
    }

    /// Runs `change` under the lock. A `None` result leaves the store untouched and
    /// notifies nobody; otherwise the revision advances and listeners get the new
    /// snapshot.
    fn apply<R>(&self, change: impl FnOnce(&mut Snapshot) -> Option<R>) -> Option<R> {
        let (outcome, revision, snapshot, listeners) = {
            let mut state = self.lock();
            let outcome = change(&mut state.snapshot)?;
            state.revision += 1;
            let listeners: Vec<Arc<SnapshotListener>> = state
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            (outcome, state.revision, state.snapshot.clone(), listeners)
        };
        debug!(
            revision,
            listeners = listeners.len(),
            records = snapshot.record_count(),
            "publishing snapshot"
        );
        for listener in listeners {
            (**listener)(revision, &snapshot);
        }
        Some(outcome)
    }
}

impl RecordStore for InMemoryStore {
    fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    fn subscribe(&self, listener: SnapshotListener) -> Subscription {
        let listener = Arc::new(listener);
        let (id, revision, current) = {
            let mut state = self.lock();
            let id = state.next_listener;
            state.next_listener += 1;
            state.listeners.push((id, Arc::clone(&listener)));
            (id, state.revision, state.snapshot.clone())
        };
        (**listener)(revision, &current);

        let weak: Weak<Mutex<StoreState>> = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                state.listeners.retain(|(existing, _)| *existing != id);
            }
        })
    }
}
