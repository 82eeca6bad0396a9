//! Inventory use-cases.
//!
//! # Invariants
//! - Posting a movement updates the item's on-hand quantity in the same call.
//! - Deleting an item never deletes its movements.
//! - Movements pointing at a missing item render with [`MISSING_REFERENCE`].

use crate::model::dates::format_date;
use crate::model::inventory::{
    InventoryItem, InventoryItemPatch, MovementKind, StockMovement, StockMovementDraft,
};
use crate::model::record::{Record, RecordId};
use crate::query::aggregate::low_stock_items;
use crate::repo::collection::{CollectionManager, RepoError, RepoResult};
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Placeholder shown for references to records that no longer exist.
pub const MISSING_REFERENCE: &str = "—";

#[derive(Debug)]
pub enum InventoryError {
    /// Movement references an item that does not exist.
    ItemNotFound(RecordId),
    /// Quantity is negative, zero for in/out, or not finite.
    InvalidQuantity(f64),
    /// An outgoing movement exceeds the on-hand balance.
    InsufficientStock {
        item_id: RecordId,
        available: f64,
        requested: f64,
    },
    Repo(RepoError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "inventory item not found: {id}"),
            Self::InvalidQuantity(quantity) => write!(f, "invalid movement quantity: {quantity}"),
            Self::InsufficientStock {
                item_id,
                available,
                requested,
            } => write!(
                f,
                "insufficient stock for item {item_id}: available {available}, requested {requested}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for InventoryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } if kind == InventoryItem::KIND => {
                Self::ItemNotFound(id)
            }
            other => Self::Repo(other),
        }
    }
}

/// Result of a successful posting.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementPosting {
    pub movement: StockMovement,
    pub item: InventoryItem,
}

/// Movement joined with its item's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRow {
    pub movement: StockMovement,
    /// Item name, or [`MISSING_REFERENCE`] when the item is gone.
    pub item_name: String,
}

pub struct InventoryService {
    items: CollectionManager<InventoryItem>,
    movements: CollectionManager<StockMovement>,
}

impl InventoryService {
    pub fn new(
        items: CollectionManager<InventoryItem>,
        movements: CollectionManager<StockMovement>,
    ) -> Self {
        Self { items, movements }
    }

    pub fn items(&self) -> &CollectionManager<InventoryItem> {
        &self.items
    }

    pub fn movements(&self) -> &CollectionManager<StockMovement> {
        &self.movements
    }

    /// Records a movement and applies it to the item's balance.
    ///
    /// `in` adds, `out` subtracts (rejecting overdraw), `adjust` sets the
    /// balance. A blank movement date becomes today.
    pub fn post_movement(
        &self,
        mut draft: StockMovementDraft,
    ) -> Result<MovementPosting, InventoryError> {
        validate_quantity(draft.kind, draft.quantity)?;
        if draft.date.trim().is_empty() {
            draft.date = format_date(self.movements.clock().today());
        }

        let kind = draft.kind;
        let quantity = draft.quantity;
        let item_id = draft.item_id.clone();
        let mut previous_quantity = 0.0;
        let item = self.items.try_update(&item_id, |item| {
            previous_quantity = item.quantity;
            let next = next_balance(item, kind, quantity)?;
            Ok::<_, InventoryError>(InventoryItemPatch {
                quantity: Some(next),
                ..InventoryItemPatch::default()
            })
        })?;

        let movement = match self.movements.create(draft) {
            Ok(movement) => movement,
            Err(err) => {
                warn!(
                    "event=movement_post module=inventory status=error item_id={} error={}",
                    item_id, err
                );
                self.restore_balance(&item_id, previous_quantity);
                return Err(err.into());
            }
        };

        info!(
            "event=movement_post module=inventory status=ok item_id={} kind={} quantity={} balance={}",
            item_id,
            kind.as_str(),
            quantity,
            item.quantity
        );
        Ok(MovementPosting { movement, item })
    }

    /// Movements of one item, oldest first.
    pub fn movements_for_item(&self, item_id: &str) -> Vec<StockMovement> {
        self.movements
            .list()
            .into_iter()
            .filter(|movement| movement.item_id == item_id)
            .collect()
    }

    /// All movements, oldest first, with item names resolved.
    pub fn movement_history(&self) -> Vec<MovementRow> {
        let names: HashMap<RecordId, String> = self
            .items
            .list()
            .into_iter()
            .map(|item| (item.id, item.name))
            .collect();

        self.movements
            .list()
            .into_iter()
            .map(|movement| {
                let item_name = names
                    .get(&movement.item_id)
                    .cloned()
                    .unwrap_or_else(|| MISSING_REFERENCE.to_string());
                MovementRow {
                    movement,
                    item_name,
                }
            })
            .collect()
    }

    /// Physically removes the item; items are the only activatable kind
    /// removed for real. Its movement history is kept and resolves to
    /// [`MISSING_REFERENCE`].
    pub fn delete_item(&self, item_id: &str) -> RepoResult<bool> {
        self.items.delete(item_id)
    }

    pub fn on_hand(&self, item_id: &str) -> Option<f64> {
        self.items.get_by_id(item_id).map(|item| item.quantity)
    }

    pub fn low_stock(&self) -> Vec<InventoryItem> {
        low_stock_items(&self.items.list())
    }

    fn restore_balance(&self, item_id: &str, quantity: f64) {
        let patch = InventoryItemPatch {
            quantity: Some(quantity),
            ..InventoryItemPatch::default()
        };
        if let Err(err) = self.items.update(item_id, patch) {
            warn!(
                "event=movement_rollback module=inventory status=error item_id={} error={}",
                item_id, err
            );
        }
    }
}

fn validate_quantity(kind: MovementKind, quantity: f64) -> Result<(), InventoryError> {
    let valid = quantity.is_finite()
        && match kind {
            MovementKind::In | MovementKind::Out => quantity > 0.0,
            MovementKind::Adjust => quantity >= 0.0,
        };
    if valid {
        Ok(())
    } else {
        Err(InventoryError::InvalidQuantity(quantity))
    }
}

fn next_balance(
    item: &InventoryItem,
    kind: MovementKind,
    quantity: f64,
) -> Result<f64, InventoryError> {
    match kind {
        MovementKind::In => Ok(item.quantity + quantity),
        MovementKind::Out if quantity > item.quantity => Err(InventoryError::InsufficientStock {
            item_id: item.id.clone(),
            available: item.quantity,
            requested: quantity,
        }),
        MovementKind::Out => Ok(item.quantity - quantity),
        MovementKind::Adjust => Ok(quantity),
    }
}
