//! Supplier registry.

use super::record::{Activatable, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: RecordId,
    pub created_at: String,
    pub name: String,
    /// CNPJ/CPF as typed by the user.
    pub document: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierDraft {
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub active: Option<bool>,
}

impl Record for Supplier {
    type Draft = SupplierDraft;
    type Patch = SupplierPatch;

    const KIND: &'static str = "supplier";
    const STORE_KEY: &'static str = "safra.suppliers";

    fn from_draft(id: RecordId, created_at: String, draft: SupplierDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            document: draft.document,
            phone: draft.phone,
            email: draft.email,
            city: draft.city,
            active: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: SupplierPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(document) = patch.document {
            self.document = document;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.city.as_str(), self.email.as_str()]
    }

    fn search_codes(&self) -> Vec<&str> {
        vec![self.document.as_str()]
    }

    fn retirement_flag(&mut self) -> Option<&mut bool> {
        Some(&mut self.active)
    }
}

impl Activatable for Supplier {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }
}
