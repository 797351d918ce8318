//! Explicit session context: who is signed in, the latest snapshot pushed by the
//! store, the clock that supplies "today", and the aggregation settings.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use spendwise_core::{
    snapshot_warnings, AggregationSettings, BillService, Clock, CoreError, CurrencyFormatter,
    Reminder, ReminderService, ReportService, SearchService, TrendService,
};
use spendwise_domain::{
    Bill, BillStatus, DashboardSummary, Expense, Income, ReportPeriod, ReportSummary, Snapshot,
    TrendPoint,
};

use crate::store::{RecordStore, Subscription};

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl User {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Anonymous user for offline sessions.
    pub fn local() -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            email: None,
            display_name: Some("Local user".to_string()),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Latest snapshot together with the store revision it came from. `None` until
/// the store has delivered anything.
#[derive(Default)]
struct Latest {
    revision: Option<u64>,
    snapshot: Snapshot,
}

pub struct Session {
    user: User,
    latest: Arc<RwLock<Latest>>,
    clock: Arc<dyn Clock>,
    settings: AggregationSettings,
    subscription: Option<Subscription>,
}

impl Session {
    /// Session that owns its snapshot and is not attached to a store.
    pub fn new(user: User, clock: Arc<dyn Clock>, settings: AggregationSettings) -> Self {
        Self {
            user,
            latest: Arc::new(RwLock::new(Latest::default())),
            clock,
            settings,
            subscription: None,
        }
    }

    /// Subscribes to `store`. A push replaces the session snapshot unless a newer
    /// revision has already arrived.
    pub fn connect(
        user: User,
        store: &dyn RecordStore,
        clock: Arc<dyn Clock>,
        settings: AggregationSettings,
    ) -> Self {
        let mut session = Self::new(user, clock, settings);
        let target = Arc::clone(&session.latest);
        let subscription = store.subscribe(Box::new(move |revision, snapshot| {
            let mut guard = target
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if Some(revision) > guard.revision {
                guard.revision = Some(revision);
                guard.snapshot = snapshot.clone();
            } else {
                debug!(revision, "ignoring stale snapshot");
            }
        }));
        session.subscription = Some(subscription);
        info!(user = %session.user.uid, "session connected to record store");
        session
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_connected(&self) -> bool {
        self.subscription.is_some()
    }

    /// Copy of the latest snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.latest
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot
            .clone()
    }

    /// Store revision of the current snapshot, if the store has delivered one.
    pub fn revision(&self) -> Option<u64> {
        self.latest
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .revision
    }

    /// Overrides the snapshot locally. The next store push replaces it again.
    pub fn replace_snapshot(&self, snapshot: Snapshot) {
        let mut guard = self
            .latest
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.snapshot = snapshot;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AggregationSettings) {
        self.settings = settings;
    }

    pub fn dashboard(&self) -> DashboardSummary {
        self.dashboard_at(self.today())
    }

    pub fn dashboard_at(&self, reference: NaiveDate) -> DashboardSummary {
        let snapshot = self.snapshot();
        ReportService::dashboard(&snapshot, reference, &self.settings)
    }

    pub fn report(&self, period: ReportPeriod) -> ReportSummary {
        let snapshot = self.snapshot();
        ReportService::report(&snapshot, period, self.today(), &self.settings)
    }

    pub fn trend(&self, months: u32) -> Result<Vec<TrendPoint>, CoreError> {
        let snapshot = self.snapshot();
        TrendService::checked_trend(&snapshot.expenses, &snapshot.income, self.today(), months)
    }

    /// Every bill with its status as of today, in store order.
    pub fn bill_statuses(&self) -> Vec<(Bill, BillStatus)> {
        let today = self.today();
        let due_soon_days = self.settings.due_soon_days;
        self.snapshot()
            .bills
            .into_iter()
            .map(|bill| {
                let status = BillService::status(&bill, today, due_soon_days);
                (bill, status)
            })
            .collect()
    }

    pub fn upcoming_bills(&self, sorted: bool) -> Vec<Bill> {
        let snapshot = self.snapshot();
        let horizon = self.settings.bill_horizon_days;
        if sorted {
            BillService::upcoming_sorted(&snapshot.bills, self.today(), horizon)
        } else {
            BillService::upcoming(&snapshot.bills, self.today(), horizon)
        }
    }

    pub fn overdue_bills(&self) -> Vec<Bill> {
        BillService::overdue(&self.snapshot().bills, self.today())
    }

    pub fn pending_reminders(&self, formatter: &dyn CurrencyFormatter) -> Vec<Reminder> {
        let today = self.today();
        let mut reminders =
            ReminderService::pending_bill_reminders(&self.snapshot().bills, today, formatter);
        reminders.push(ReminderService::monthly_report(today));
        reminders
    }

    pub fn search_expenses(&self, query: &str) -> Vec<Expense> {
        let snapshot = self.snapshot();
        SearchService::expenses(&snapshot.expenses, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_income(&self, query: &str) -> Vec<Income> {
        let snapshot = self.snapshot();
        SearchService::income(&snapshot.income, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_bills(&self, query: &str) -> Vec<Bill> {
        let snapshot = self.snapshot();
        SearchService::bills(&snapshot.bills, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        snapshot_warnings(&self.snapshot())
    }

    /// Signs out: stops listening to the store and clears the snapshot.
    pub fn end(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.replace_snapshot(Snapshot::default());
        debug!(user = %self.user.uid, "session ended");
    }
}
