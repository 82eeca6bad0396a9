//! Accounts payable/receivable use-cases.

use crate::model::account::{Account, AccountKind, AccountPatch, AccountStatus};
use crate::model::dates::{format_date, parse_date};
use crate::query::aggregate::{effective_account_status, summarize_accounts, AccountSummary};
use crate::query::filter::{filter_by_range, DateRange, Predicate};
use crate::repo::collection::{CollectionManager, RepoResult};
use log::info;

pub struct AccountService {
    accounts: CollectionManager<Account>,
}

impl AccountService {
    pub fn new(accounts: CollectionManager<Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &CollectionManager<Account> {
        &self.accounts
    }

    /// Settles an account. A missing or blank `paid_at` means today.
    pub fn mark_paid(&self, id: &str, paid_at: Option<&str>) -> RepoResult<Account> {
        let paid_at = paid_at
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format_date(self.accounts.clock().today()));
        self.accounts.update(
            id,
            AccountPatch {
                status: Some(AccountStatus::Paid),
                paid_at: Some(Some(paid_at)),
                ..AccountPatch::default()
            },
        )
    }

    /// Persists `overdue` on every pending account past its due date.
    /// Returns the flipped accounts.
    pub fn refresh_overdue(&self) -> RepoResult<Vec<Account>> {
        let today = self.accounts.clock().today();
        let flipped = self.accounts.update_where(
            |account| {
                account.status == AccountStatus::Pending
                    && effective_account_status(account, today) == AccountStatus::Overdue
            },
            |_| AccountPatch {
                status: Some(AccountStatus::Overdue),
                ..AccountPatch::default()
            },
        )?;

        if !flipped.is_empty() {
            info!(
                "event=accounts_refresh_overdue module=finance status=ok flipped={}",
                flipped.len()
            );
        }
        Ok(flipped)
    }

    /// Accounts of one kind due within `range`, optionally narrowed to a
    /// category. Overdue is evaluated against today.
    pub fn due_within(
        &self,
        kind: AccountKind,
        range: &DateRange,
        status: Option<AccountStatus>,
        category: &str,
    ) -> Vec<Account> {
        let today = self.accounts.clock().today();
        let mut predicates = vec![
            Predicate::custom(move |account: &Account| account.kind == kind),
            Predicate::equals(|account: &Account| account.category.as_str(), category),
        ];
        if let Some(status) = status {
            predicates.push(Predicate::custom(move |account: &Account| {
                effective_account_status(account, today) == status
            }));
        }

        let mut due = filter_by_range(&self.accounts.list(), range, &predicates);
        due.sort_by_key(|account| parse_date(&account.due_date));
        due
    }

    /// Totals of accounts due within `range`.
    pub fn summary(&self, range: &DateRange) -> AccountSummary {
        let today = self.accounts.clock().today();
        let in_range = filter_by_range(&self.accounts.list(), range, &[]);
        summarize_accounts(&in_range, today)
    }
}
