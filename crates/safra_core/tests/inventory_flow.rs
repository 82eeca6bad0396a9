use chrono::NaiveDate;
use safra_core::{
    FarmStores, FixedClock, InventoryError, InventoryItemDraft, MemorySlotBackend, MovementKind,
    PersistencePolicy, SharedBackend, StockMovementDraft, MISSING_REFERENCE,
};
use std::sync::Arc;

fn stores_at(date: &str) -> FarmStores {
    let today = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    FarmStores::with_options(
        SharedBackend::in_memory(),
        Arc::new(FixedClock(today)),
        PersistencePolicy::BestEffort,
    )
}

#[test]
fn seed_bag_scenario_keeps_history_after_item_delete() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();

    let item = inventory
        .items()
        .create(InventoryItemDraft::new("Seed Bag"))
        .unwrap();
    assert_eq!(item.created_at, "2024-03-01");
    assert_eq!(item.quantity, 0.0);

    let posting = inventory
        .post_movement(StockMovementDraft::new(
            item.id.clone(),
            MovementKind::In,
            50.0,
        ))
        .unwrap();
    assert_eq!(posting.item.quantity, 50.0);
    assert_eq!(posting.movement.date, "2024-03-01");
    assert_eq!(inventory.on_hand(&item.id), Some(50.0));

    assert!(inventory.delete_item(&item.id).unwrap());
    assert_eq!(inventory.on_hand(&item.id), None);

    let movements = inventory.movements_for_item(&item.id);
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, 50.0);

    let history = inventory.movement_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].item_name, MISSING_REFERENCE);
}

#[test]
fn history_resolves_names_of_existing_items() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();
    let item = inventory
        .items()
        .create(InventoryItemDraft::new("Calcario"))
        .unwrap();

    inventory
        .post_movement(StockMovementDraft::new(item.id.clone(), MovementKind::In, 3.0))
        .unwrap();

    let history = inventory.movement_history();
    assert_eq!(history[0].item_name, "Calcario");
}

#[test]
fn out_movements_cannot_overdraw() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();
    let item = inventory
        .items()
        .create(InventoryItemDraft {
            quantity: 10.0,
            ..InventoryItemDraft::new("Diesel")
        })
        .unwrap();

    let err = inventory
        .post_movement(StockMovementDraft::new(item.id.clone(), MovementKind::Out, 12.0))
        .unwrap_err();
    match err {
        InventoryError::InsufficientStock {
            available,
            requested,
            ..
        } => {
            assert_eq!(available, 10.0);
            assert_eq!(requested, 12.0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(inventory.on_hand(&item.id), Some(10.0));
    assert!(inventory.movements().list().is_empty());

    let posting = inventory
        .post_movement(StockMovementDraft::new(item.id.clone(), MovementKind::Out, 4.0))
        .unwrap();
    assert_eq!(posting.item.quantity, 6.0);
}

#[test]
fn adjust_sets_the_balance() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();
    let item = inventory
        .items()
        .create(InventoryItemDraft {
            quantity: 7.0,
            ..InventoryItemDraft::new("Herbicida")
        })
        .unwrap();

    let posting = inventory
        .post_movement(StockMovementDraft::new(item.id.clone(), MovementKind::Adjust, 2.5))
        .unwrap();
    assert_eq!(posting.item.quantity, 2.5);
    assert_eq!(posting.movement.kind, MovementKind::Adjust);
}

#[test]
fn invalid_quantities_and_unknown_items_are_rejected() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();
    let item = inventory
        .items()
        .create(InventoryItemDraft::new("Semente"))
        .unwrap();

    for (kind, quantity) in [
        (MovementKind::In, 0.0),
        (MovementKind::Out, -1.0),
        (MovementKind::Adjust, f64::NAN),
    ] {
        let err = inventory
            .post_movement(StockMovementDraft::new(item.id.clone(), kind, quantity))
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidQuantity(_)));
    }

    let err = inventory
        .post_movement(StockMovementDraft::new("ghost", MovementKind::In, 1.0))
        .unwrap_err();
    assert!(matches!(err, InventoryError::ItemNotFound(ref id) if id == "ghost"));
    assert!(inventory.movements().list().is_empty());
}

#[test]
fn low_stock_lists_active_items_under_minimum() {
    let stores = stores_at("2024-03-01");
    let inventory = stores.inventory();
    let low = inventory
        .items()
        .create(InventoryItemDraft {
            quantity: 2.0,
            min_quantity: 5.0,
            ..InventoryItemDraft::new("low")
        })
        .unwrap();
    inventory
        .items()
        .create(InventoryItemDraft {
            quantity: 9.0,
            min_quantity: 5.0,
            ..InventoryItemDraft::new("fine")
        })
        .unwrap();
    let retired = inventory
        .items()
        .create(InventoryItemDraft {
            quantity: 0.0,
            min_quantity: 5.0,
            ..InventoryItemDraft::new("retired")
        })
        .unwrap();
    inventory.items().set_active(&retired.id, false).unwrap();

    let ids: Vec<String> = inventory
        .low_stock()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![low.id]);
}

#[test]
fn failed_movement_write_restores_the_balance() {
    let memory = MemorySlotBackend::with_quota(300);
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let stores = FarmStores::with_options(
        SharedBackend::new(memory.clone()),
        Arc::new(FixedClock(today)),
        PersistencePolicy::Strict,
    );
    let inventory = stores.inventory();
    let item = inventory
        .items()
        .create(InventoryItemDraft::new("Seed Bag"))
        .unwrap();

    let mut draft = StockMovementDraft::new(item.id.clone(), MovementKind::In, 5.0);
    draft.reason = "x".repeat(400);
    let err = inventory.post_movement(draft).unwrap_err();

    assert!(matches!(err, InventoryError::Repo(_)));
    assert_eq!(inventory.on_hand(&item.id), Some(0.0));
    assert!(inventory.movements().list().is_empty());
}
