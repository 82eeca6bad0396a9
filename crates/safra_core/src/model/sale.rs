//! Produce sales ("vendas").

use super::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: RecordId,
    pub created_at: String,
    /// Contract/invoice code, e.g. `VD-2024-007`.
    pub code: String,
    pub customer: String,
    pub product: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub status: SaleStatus,
}

impl Sale {
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub code: String,
    pub customer: String,
    pub product: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub date: String,
    pub status: SaleStatus,
}

impl SaleDraft {
    pub fn new(
        customer: impl Into<String>,
        product: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            code: String::new(),
            customer: customer.into(),
            product: product.into(),
            quantity,
            unit: String::new(),
            unit_price,
            date: date.into(),
            status: SaleStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    pub code: Option<String>,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub date: Option<String>,
    pub status: Option<SaleStatus>,
}

impl Record for Sale {
    type Draft = SaleDraft;
    type Patch = SalePatch;

    const KIND: &'static str = "sale";
    const STORE_KEY: &'static str = "safra.vendas";

    fn from_draft(id: RecordId, created_at: String, draft: SaleDraft) -> Self {
        Self {
            id,
            created_at,
            code: draft.code,
            customer: draft.customer,
            product: draft.product,
            quantity: draft.quantity,
            unit: draft.unit,
            unit_price: draft.unit_price,
            date: draft.date,
            status: draft.status,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: SalePatch) {
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(customer) = patch.customer {
            self.customer = customer;
        }
        if let Some(product) = patch.product {
            self.product = product;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.customer.as_str(), self.product.as_str()]
    }

    fn search_codes(&self) -> Vec<&str> {
        vec![self.code.as_str()]
    }

    fn record_date(&self) -> &str {
        &self.date
    }
}
