//! Accounts payable and receivable.
//!
//! Status transitions are not constrained: any status may be written at any
//! time.

use super::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Payable,
    Receivable,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Receivable => "receivable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: RecordId,
    pub created_at: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub description: String,
    /// Free-form category (`insumos`, `combustível`, ...).
    pub category: String,
    pub amount: f64,
    /// `YYYY-MM-DD`.
    pub due_date: String,
    pub status: AccountStatus,
    pub paid_at: Option<String>,
    /// Supplier or customer name.
    pub counterparty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub kind: AccountKind,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub due_date: String,
    pub status: AccountStatus,
    pub counterparty: String,
}

impl AccountDraft {
    /// Pending account with empty optional fields.
    pub fn new(
        kind: AccountKind,
        description: impl Into<String>,
        amount: f64,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            category: String::new(),
            amount,
            due_date: due_date.into(),
            status: AccountStatus::Pending,
            counterparty: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub kind: Option<AccountKind>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<String>,
    pub status: Option<AccountStatus>,
    pub paid_at: Option<Option<String>>,
    pub counterparty: Option<String>,
}

impl Record for Account {
    type Draft = AccountDraft;
    type Patch = AccountPatch;

    const KIND: &'static str = "account";
    const STORE_KEY: &'static str = "safra.accounts";

    fn from_draft(id: RecordId, created_at: String, draft: AccountDraft) -> Self {
        Self {
            id,
            created_at,
            kind: draft.kind,
            description: draft.description,
            category: draft.category,
            amount: draft.amount,
            due_date: draft.due_date,
            status: draft.status,
            paid_at: None,
            counterparty: draft.counterparty,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: AccountPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(paid_at) = patch.paid_at {
            self.paid_at = paid_at;
        }
        if let Some(counterparty) = patch.counterparty {
            self.counterparty = counterparty;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            self.category.as_str(),
            self.counterparty.as_str(),
        ]
    }

    fn record_date(&self) -> &str {
        &self.due_date
    }
}
