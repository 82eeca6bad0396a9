//! Inventory items and the stock movements posted against them.
//!
//! # Invariants
//! - `StockMovement::item_id` is a plain reference: an item may be deleted
//!   while its movements remain.
//! - `InventoryItem::quantity` is the derived on-hand balance, maintained by
//!   the movement-posting use-case.

use super::record::{Activatable, ListOrder, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub created_at: String,
    /// Structured stock code, e.g. `SEM-001`.
    pub code: String,
    pub name: String,
    pub category: String,
    /// Unit of measure (`kg`, `sc`, `L`, ...).
    pub unit: String,
    pub quantity: f64,
    /// Alert threshold; `0` disables low-stock alerts.
    pub min_quantity: f64,
    pub unit_cost: f64,
    pub supplier_id: Option<RecordId>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItemDraft {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub min_quantity: f64,
    pub unit_cost: f64,
    pub supplier_id: Option<RecordId>,
}

impl InventoryItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItemPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub min_quantity: Option<f64>,
    pub unit_cost: Option<f64>,
    pub supplier_id: Option<Option<RecordId>>,
    pub active: Option<bool>,
}

impl InventoryItem {
    pub fn stock_value(&self) -> f64 {
        self.quantity * self.unit_cost
    }

    pub fn is_below_minimum(&self) -> bool {
        self.min_quantity > 0.0 && self.quantity < self.min_quantity
    }
}

impl Record for InventoryItem {
    type Draft = InventoryItemDraft;
    type Patch = InventoryItemPatch;

    const KIND: &'static str = "item";
    const STORE_KEY: &'static str = "safra.items";

    fn from_draft(id: RecordId, created_at: String, draft: InventoryItemDraft) -> Self {
        Self {
            id,
            created_at,
            code: draft.code,
            name: draft.name,
            category: draft.category,
            unit: draft.unit,
            quantity: draft.quantity,
            min_quantity: draft.min_quantity,
            unit_cost: draft.unit_cost,
            supplier_id: draft.supplier_id,
            active: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: InventoryItemPatch) {
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(min_quantity) = patch.min_quantity {
            self.min_quantity = min_quantity;
        }
        if let Some(unit_cost) = patch.unit_cost {
            self.unit_cost = unit_cost;
        }
        if let Some(supplier_id) = patch.supplier_id {
            self.supplier_id = supplier_id;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str(), self.code.as_str()]
    }

    fn search_codes(&self) -> Vec<&str> {
        vec![self.code.as_str()]
    }
}

impl Activatable for InventoryItem {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Adds `quantity` to the balance.
    In,
    /// Subtracts `quantity` from the balance.
    Out,
    /// Sets the balance to `quantity` (stock count correction).
    Adjust,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Adjust => "adjust",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: RecordId,
    pub created_at: String,
    pub item_id: RecordId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: f64,
    /// Movement date, `YYYY-MM-DD`.
    pub date: String,
    pub reason: String,
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockMovementDraft {
    pub item_id: RecordId,
    pub kind: MovementKind,
    pub quantity: f64,
    /// Blank means "today" when posted through the inventory service.
    pub date: String,
    pub reason: String,
    pub unit_cost: Option<f64>,
}

impl StockMovementDraft {
    pub fn new(item_id: impl Into<RecordId>, kind: MovementKind, quantity: f64) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            quantity,
            date: String::new(),
            reason: String::new(),
            unit_cost: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockMovementPatch {
    pub item_id: Option<RecordId>,
    pub kind: Option<MovementKind>,
    pub quantity: Option<f64>,
    pub date: Option<String>,
    pub reason: Option<String>,
    pub unit_cost: Option<Option<f64>>,
}

impl Record for StockMovement {
    type Draft = StockMovementDraft;
    type Patch = StockMovementPatch;

    const KIND: &'static str = "movement";
    const STORE_KEY: &'static str = "safra.movements";
    const LIST_ORDER: ListOrder = ListOrder::DateAscending;

    fn from_draft(id: RecordId, created_at: String, draft: StockMovementDraft) -> Self {
        Self {
            id,
            created_at,
            item_id: draft.item_id,
            kind: draft.kind,
            quantity: draft.quantity,
            date: draft.date,
            reason: draft.reason,
            unit_cost: draft.unit_cost,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: StockMovementPatch) {
        if let Some(item_id) = patch.item_id {
            self.item_id = item_id;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason;
        }
        if let Some(unit_cost) = patch.unit_cost {
            self.unit_cost = unit_cost;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.reason.as_str(), self.kind.as_str()]
    }

    fn record_date(&self) -> &str {
        &self.date
    }
}
