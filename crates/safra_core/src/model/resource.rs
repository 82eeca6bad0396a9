//! Machines, implements and other operational resources ("recursos").

use super::record::{Activatable, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Machine,
    Implement,
    Vehicle,
    Tool,
    Other,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::Implement => "implement",
            Self::Vehicle => "vehicle",
            Self::Tool => "tool",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: RecordId,
    pub created_at: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub description: String,
    pub hourly_cost: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDraft {
    pub name: String,
    pub kind: ResourceKind,
    pub description: String,
    pub hourly_cost: f64,
}

impl ResourceDraft {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            hourly_cost: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePatch {
    pub name: Option<String>,
    pub kind: Option<ResourceKind>,
    pub description: Option<String>,
    pub hourly_cost: Option<f64>,
    pub enabled: Option<bool>,
}

impl Record for Resource {
    type Draft = ResourceDraft;
    type Patch = ResourcePatch;

    const KIND: &'static str = "resource";
    const STORE_KEY: &'static str = "safra.recursos";

    fn from_draft(id: RecordId, created_at: String, draft: ResourceDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            kind: draft.kind,
            description: draft.description,
            hourly_cost: draft.hourly_cost,
            enabled: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: ResourcePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(hourly_cost) = patch.hourly_cost {
            self.hourly_cost = hourly_cost;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn retirement_flag(&mut self) -> Option<&mut bool> {
        Some(&mut self.enabled)
    }
}

impl Activatable for Resource {
    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_active_flag(&mut self, active: bool) {
        self.enabled = active;
    }
}
