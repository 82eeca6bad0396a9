//! Farm staff ("funcionários").

use super::record::{Activatable, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: RecordId,
    pub created_at: String,
    pub name: String,
    pub role: String,
    /// CPF as typed by the user.
    pub document: String,
    pub phone: String,
    /// `YYYY-MM-DD`, empty when unknown.
    pub hired_at: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub role: String,
    pub document: String,
    pub phone: String,
    pub hired_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub hired_at: Option<String>,
    pub active: Option<bool>,
}

impl Record for Employee {
    type Draft = EmployeeDraft;
    type Patch = EmployeePatch;

    const KIND: &'static str = "employee";
    const STORE_KEY: &'static str = "safra.funcionarios";

    fn from_draft(id: RecordId, created_at: String, draft: EmployeeDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            role: draft.role,
            document: draft.document,
            phone: draft.phone,
            hired_at: draft.hired_at,
            active: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(document) = patch.document {
            self.document = document;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(hired_at) = patch.hired_at {
            self.hired_at = hired_at;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.role.as_str()]
    }

    fn search_codes(&self) -> Vec<&str> {
        vec![self.document.as_str()]
    }

    fn retirement_flag(&mut self) -> Option<&mut bool> {
        Some(&mut self.active)
    }
}

impl Activatable for Employee {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }
}
