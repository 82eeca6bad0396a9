//! Field activities scheduled within a crop cycle.

use super::record::{ListOrder, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Planned,
    InProgress,
    Done,
    Cancelled,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: RecordId,
    pub created_at: String,
    pub title: String,
    pub description: String,
    /// Operation type (`plantio`, `pulverização`, `colheita`, ...).
    pub category: String,
    /// `YYYY-MM-DD`.
    pub scheduled_date: String,
    pub status: ActivityStatus,
    /// Field/plot name as shown to the user.
    pub field: String,
    /// Crop cycle reference held by the remote catalog.
    pub safra_id: Option<String>,
    /// Employee reference.
    pub responsible_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub scheduled_date: String,
    pub status: ActivityStatus,
    pub field: String,
    pub safra_id: Option<String>,
    pub responsible_id: Option<RecordId>,
}

impl ActivityDraft {
    pub fn new(title: impl Into<String>, scheduled_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: String::new(),
            scheduled_date: scheduled_date.into(),
            status: ActivityStatus::Planned,
            field: String::new(),
            safra_id: None,
            responsible_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub scheduled_date: Option<String>,
    pub status: Option<ActivityStatus>,
    pub field: Option<String>,
    pub safra_id: Option<Option<String>>,
    pub responsible_id: Option<Option<RecordId>>,
}

impl Record for Activity {
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    const KIND: &'static str = "activity";
    const STORE_KEY: &'static str = "safra.activities";
    const LIST_ORDER: ListOrder = ListOrder::DateDescending;

    fn from_draft(id: RecordId, created_at: String, draft: ActivityDraft) -> Self {
        Self {
            id,
            created_at,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            scheduled_date: draft.scheduled_date,
            status: draft.status,
            field: draft.field,
            safra_id: draft.safra_id,
            responsible_id: draft.responsible_id,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn apply_patch(&mut self, patch: ActivityPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            self.scheduled_date = scheduled_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(field) = patch.field {
            self.field = field;
        }
        if let Some(safra_id) = patch.safra_id {
            self.safra_id = safra_id;
        }
        if let Some(responsible_id) = patch.responsible_id {
            self.responsible_id = responsible_id;
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn record_date(&self) -> &str {
        &self.scheduled_date
    }
}
