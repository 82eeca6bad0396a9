//! Derived totals and status summaries.
//!
//! # Invariants
//! - Cancelled records never contribute to money totals.
//! - Overdue is derived from the due date when the stored status is still
//!   `pending`; stored statuses are never rewritten here.

use crate::model::account::{Account, AccountKind, AccountStatus};
use crate::model::activity::{Activity, ActivityStatus};
use crate::model::dates::parse_date;
use crate::model::inventory::InventoryItem;
use crate::model::purchase_order::{PurchaseOrder, PurchaseOrderStatus};
use crate::model::sale::{Sale, SaleStatus};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;

pub fn sum_by<T>(records: &[T], value: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(value).sum()
}

pub fn count_by<T, K>(records: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize>
where
    K: Eq + Hash,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Status an account effectively has on `today`.
///
/// A pending account whose due date is before `today` is overdue. Accounts
/// with an unparseable due date keep their stored status.
pub fn effective_account_status(account: &Account, today: NaiveDate) -> AccountStatus {
    match account.status {
        AccountStatus::Pending => match parse_date(&account.due_date) {
            Some(due) if due < today => AccountStatus::Overdue,
            _ => AccountStatus::Pending,
        },
        other => other,
    }
}

/// Money totals for one account kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountTotals {
    pub pending: f64,
    pub paid: f64,
    pub overdue: f64,
    pub cancelled: f64,
    pub count: usize,
}

impl AccountTotals {
    /// Amount still to be settled.
    pub fn open(&self) -> f64 {
        self.pending + self.overdue
    }

    fn add(&mut self, status: AccountStatus, amount: f64) {
        self.count += 1;
        match status {
            AccountStatus::Pending => self.pending += amount,
            AccountStatus::Paid => self.paid += amount,
            AccountStatus::Overdue => self.overdue += amount,
            AccountStatus::Cancelled => self.cancelled += amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountSummary {
    pub payable: AccountTotals,
    pub receivable: AccountTotals,
}

impl AccountSummary {
    /// Settled receivables minus settled payables.
    pub fn realized_balance(&self) -> f64 {
        self.receivable.paid - self.payable.paid
    }

    /// Open receivables minus open payables.
    pub fn projected_balance(&self) -> f64 {
        self.receivable.open() - self.payable.open()
    }
}

pub fn summarize_accounts(accounts: &[Account], today: NaiveDate) -> AccountSummary {
    let mut summary = AccountSummary::default();
    for account in accounts {
        let status = effective_account_status(account, today);
        let totals = match account.kind {
            AccountKind::Payable => &mut summary.payable,
            AccountKind::Receivable => &mut summary.receivable,
        };
        totals.add(status, account.amount);
    }
    summary
}

/// Active items below their minimum quantity.
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items
        .iter()
        .filter(|item| item.active && item.is_below_minimum())
        .cloned()
        .collect()
}

/// Valuation of active stock at unit cost.
pub fn inventory_value(items: &[InventoryItem]) -> f64 {
    items
        .iter()
        .filter(|item| item.active)
        .map(InventoryItem::stock_value)
        .sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStatusSummary {
    pub planned: usize,
    pub in_progress: usize,
    pub done: usize,
    pub cancelled: usize,
    /// Planned or in-progress activities scheduled before today.
    pub late: usize,
}

impl ActivityStatusSummary {
    pub fn total(&self) -> usize {
        self.planned + self.in_progress + self.done + self.cancelled
    }

    /// Done share of non-cancelled activities, in `0.0..=1.0`.
    pub fn completion_ratio(&self) -> f64 {
        let relevant = self.total() - self.cancelled;
        if relevant == 0 {
            return 0.0;
        }
        self.done as f64 / relevant as f64
    }
}

pub fn is_activity_late(activity: &Activity, today: NaiveDate) -> bool {
    matches!(
        activity.status,
        ActivityStatus::Planned | ActivityStatus::InProgress
    ) && parse_date(&activity.scheduled_date).is_some_and(|date| date < today)
}

pub fn summarize_activities(activities: &[Activity], today: NaiveDate) -> ActivityStatusSummary {
    let mut summary = ActivityStatusSummary::default();
    for activity in activities {
        match activity.status {
            ActivityStatus::Planned => summary.planned += 1,
            ActivityStatus::InProgress => summary.in_progress += 1,
            ActivityStatus::Done => summary.done += 1,
            ActivityStatus::Cancelled => summary.cancelled += 1,
        }
        if is_activity_late(activity, today) {
            summary.late += 1;
        }
    }
    summary
}

pub fn sales_total(sales: &[Sale]) -> f64 {
    sales
        .iter()
        .filter(|sale| sale.status != SaleStatus::Cancelled)
        .map(Sale::total)
        .sum()
}

pub fn purchase_orders_total(orders: &[PurchaseOrder]) -> f64 {
    orders
        .iter()
        .filter(|order| order.status != PurchaseOrderStatus::Cancelled)
        .map(PurchaseOrder::total)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{
        count_by, effective_account_status, low_stock_items, summarize_accounts,
        summarize_activities,
    };
    use crate::model::account::{Account, AccountDraft, AccountKind, AccountStatus};
    use crate::model::activity::{Activity, ActivityDraft, ActivityStatus};
    use crate::model::inventory::{InventoryItem, InventoryItemDraft};
    use crate::model::record::Record;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn account(kind: AccountKind, amount: f64, due: &str, status: AccountStatus) -> Account {
        let mut draft = AccountDraft::new(kind, "conta", amount, due);
        draft.status = status;
        Account::from_draft("id".to_string(), "2024-01-01".to_string(), draft)
    }

    #[test]
    fn pending_past_due_is_overdue() {
        let late = account(AccountKind::Payable, 1.0, "2024-03-09", AccountStatus::Pending);
        let due_today = account(AccountKind::Payable, 1.0, "2024-03-10", AccountStatus::Pending);
        let paid = account(AccountKind::Payable, 1.0, "2024-01-01", AccountStatus::Paid);

        assert_eq!(effective_account_status(&late, today()), AccountStatus::Overdue);
        assert_eq!(effective_account_status(&due_today, today()), AccountStatus::Pending);
        assert_eq!(effective_account_status(&paid, today()), AccountStatus::Paid);
    }

    #[test]
    fn account_summary_splits_kinds_and_statuses() {
        let accounts = vec![
            account(AccountKind::Payable, 100.0, "2024-03-01", AccountStatus::Pending),
            account(AccountKind::Payable, 50.0, "2024-03-20", AccountStatus::Pending),
            account(AccountKind::Payable, 30.0, "2024-02-01", AccountStatus::Paid),
            account(AccountKind::Receivable, 500.0, "2024-04-01", AccountStatus::Pending),
            account(AccountKind::Receivable, 80.0, "2024-02-01", AccountStatus::Paid),
            account(AccountKind::Receivable, 999.0, "2024-02-01", AccountStatus::Cancelled),
        ];

        let summary = summarize_accounts(&accounts, today());
        assert_eq!(summary.payable.overdue, 100.0);
        assert_eq!(summary.payable.pending, 50.0);
        assert_eq!(summary.payable.count, 3);
        assert_eq!(summary.receivable.cancelled, 999.0);
        assert_eq!(summary.realized_balance(), 50.0);
        assert_eq!(summary.projected_balance(), 350.0);
    }

    #[test]
    fn low_stock_skips_inactive_and_unset_minimums() {
        let mut low = InventoryItemDraft::new("Ureia");
        low.quantity = 2.0;
        low.min_quantity = 10.0;
        let mut no_min = InventoryItemDraft::new("Luvas");
        no_min.quantity = 0.0;
        let items = vec![
            InventoryItem::from_draft("a".into(), "2024-01-01".into(), low.clone()),
            InventoryItem::from_draft("b".into(), "2024-01-01".into(), no_min),
            {
                let mut inactive = InventoryItem::from_draft("c".into(), "2024-01-01".into(), low);
                inactive.active = false;
                inactive
            },
        ];

        let hits = low_stock_items(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    fn activity(id: &str, draft: ActivityDraft) -> Activity {
        Activity::from_draft(id.to_string(), "2024-01-01".to_string(), draft)
    }

    #[test]
    fn activity_summary_counts_late_work() {
        let mut done = ActivityDraft::new("Colheita", "2024-03-01");
        done.status = ActivityStatus::Done;
        let activities = vec![
            activity("a", ActivityDraft::new("Plantio", "2024-03-01")),
            activity("b", ActivityDraft::new("Adubação", "2024-03-20")),
            activity("c", done),
        ];

        let summary = summarize_activities(&activities, today());
        assert_eq!(summary.planned, 2);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.late, 1);
        assert!((summary.completion_ratio() - 1.0 / 3.0).abs() < 1e-9);

        let by_status = count_by(&activities, |activity| activity.status);
        assert_eq!(by_status[&ActivityStatus::Planned], 2);
    }
}
