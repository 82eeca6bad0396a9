//! Purchase orders ("pedidos de compra").

use super::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Sent,
    Approved,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Approved => "approved",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One ordered line. `item_id` optionally links an inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: Option<RecordId>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            item_id: None,
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: RecordId,
    pub created_at: String,
    /// Sequential code, e.g. `PC-0007`.
    pub code: String,
    pub supplier_id: Option<RecordId>,
    /// `YYYY-MM-DD`.
    pub order_date: String,
    pub expected_date: Option<String>,
    pub lines: Vec<OrderLine>,
    pub status: PurchaseOrderStatus,
    pub notes: String,
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::total).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrderDraft {
    /// Blank lets the purchase-order service assign the next code.
    pub code: String,
    pub supplier_id: Option<RecordId>,
    pub order_date: String,
    pub expected_date: Option<String>,
    pub lines: Vec<OrderLine>,
    pub status: PurchaseOrderStatus,
    pub notes: String,
}

impl PurchaseOrderDraft {
    pub fn new(order_date: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        Self {
            code: String::new(),
            supplier_id: None,
            order_date: order_date.into(),
            expected_date: None,
            lines,
            status: PurchaseOrderStatus::Draft,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseOrderPatch {
    pub code: Option<String>,
    pub supplier_id: Option<Option<RecordId>>,
    pub order_date: Option<String>,
    pub expected_date: Option<Option<String>>,
    /// Replaces the full line list.
    pub lines: Option<Vec<OrderLine>>,
    pub status: Option<PurchaseOrderStatus>,
    pub notes: Option<String>,
}

impl Record for PurchaseOrder {
    type Draft = PurchaseOrderDraft;
    type Patch = PurchaseOrderPatch;

    const KIND: &'static str = "purchase_order";
    const STORE_KEY: &'static str = "safra.pedidos";

    fn from_draft(id: RecordId, created_at: String, draft: PurchaseOrderDraft) -> Self {
        Self {
            id,
            created_at,
            code: draft.code,
            supplier_id: draft.supplier_id,
            order_date: draft.order_date,
            expected_date: draft.expected_date,
            lines: draft.lines,
            status: draft.status,
            notes: draft.notes,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: PurchaseOrderPatch) {
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(supplier_id) = patch.supplier_id {
            self.supplier_id = supplier_id;
        }
        if let Some(order_date) = patch.order_date {
            self.order_date = order_date;
        }
        if let Some(expected_date) = patch.expected_date {
            self.expected_date = expected_date;
        }
        if let Some(lines) = patch.lines {
            self.lines = lines;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.notes.as_str()];
        fields.extend(self.lines.iter().map(|line| line.description.as_str()));
        fields
    }

    fn search_codes(&self) -> Vec<&str> {
        vec![self.code.as_str()]
    }

    fn record_date(&self) -> &str {
        &self.order_date
    }
}
