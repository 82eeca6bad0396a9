//! Core record-keeping for farm management: inventory, stock movements,
//! suppliers, accounts, activities, resources, staff, sales and purchase
//! orders, each kept as one whole-list slot.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod stores;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::account::{Account, AccountDraft, AccountKind, AccountPatch, AccountStatus};
pub use model::activity::{Activity, ActivityDraft, ActivityPatch, ActivityStatus};
pub use model::clock::{Clock, FixedClock, SystemClock};
pub use model::dates::{format_date, parse_date};
pub use model::employee::{Employee, EmployeeDraft, EmployeePatch};
pub use model::inventory::{
    InventoryItem, InventoryItemDraft, InventoryItemPatch, MovementKind, StockMovement,
    StockMovementDraft, StockMovementPatch,
};
pub use model::purchase_order::{
    OrderLine, PurchaseOrder, PurchaseOrderDraft, PurchaseOrderPatch, PurchaseOrderStatus,
};
pub use model::record::{new_record_id, Activatable, ListOrder, Record, RecordId};
pub use model::resource::{Resource, ResourceDraft, ResourceKind, ResourcePatch};
pub use model::sale::{Sale, SaleDraft, SalePatch, SaleStatus};
pub use model::supplier::{Supplier, SupplierDraft, SupplierPatch};
pub use query::aggregate::{AccountSummary, AccountTotals, ActivityStatusSummary};
pub use query::filter::{filter_by_range, filter_records, DateRange, Predicate};
pub use repo::collection::{CollectionManager, PersistencePolicy, RepoError, RepoResult};
pub use search::text::{detect_search_mode, search_records, SearchMode};
pub use service::account_service::AccountService;
pub use service::inventory_service::{
    InventoryError, InventoryService, MovementPosting, MovementRow, MISSING_REFERENCE,
};
pub use service::purchase_order_service::PurchaseOrderService;
pub use store::{
    MemorySlotBackend, SharedBackend, SlotBackend, SqliteSlotBackend, Store, StoreError,
    StoreResult,
};
pub use stores::FarmStores;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
