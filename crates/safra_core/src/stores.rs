//! Production wiring: one manager per record kind over one shared backend.
//!
//! Every `FarmStores` built from clones of the same [`SharedBackend`] sees
//! the same data and shares the same slot locks.

use crate::config::CoreConfig;
use crate::model::account::Account;
use crate::model::activity::Activity;
use crate::model::clock::{Clock, SystemClock};
use crate::model::employee::Employee;
use crate::model::inventory::{InventoryItem, StockMovement};
use crate::model::purchase_order::PurchaseOrder;
use crate::model::record::Record;
use crate::model::resource::Resource;
use crate::model::sale::Sale;
use crate::model::supplier::Supplier;
use crate::repo::collection::{CollectionManager, PersistencePolicy};
use crate::service::account_service::AccountService;
use crate::service::inventory_service::InventoryService;
use crate::service::purchase_order_service::PurchaseOrderService;
use crate::store::{SharedBackend, SqliteSlotBackend, StoreResult};
use log::info;
use std::sync::Arc;

pub struct FarmStores {
    backend: SharedBackend,
    pub items: CollectionManager<InventoryItem>,
    pub movements: CollectionManager<StockMovement>,
    pub suppliers: CollectionManager<Supplier>,
    pub accounts: CollectionManager<Account>,
    pub activities: CollectionManager<Activity>,
    pub resources: CollectionManager<Resource>,
    pub employees: CollectionManager<Employee>,
    pub sales: CollectionManager<Sale>,
    pub purchase_orders: CollectionManager<PurchaseOrder>,
}

impl FarmStores {
    pub fn new(backend: SharedBackend) -> Self {
        Self::with_options(backend, Arc::new(SystemClock), PersistencePolicy::default())
    }

    pub fn with_options(
        backend: SharedBackend,
        clock: Arc<dyn Clock>,
        policy: PersistencePolicy,
    ) -> Self {
        Self {
            items: manager(&backend, &clock, policy),
            movements: manager(&backend, &clock, policy),
            suppliers: manager(&backend, &clock, policy),
            accounts: manager(&backend, &clock, policy),
            activities: manager(&backend, &clock, policy),
            resources: manager(&backend, &clock, policy),
            employees: manager(&backend, &clock, policy),
            sales: manager(&backend, &clock, policy),
            purchase_orders: manager(&backend, &clock, policy),
            backend,
        }
    }

    /// Opens the SQLite slot database named by `config`.
    pub fn open(config: &CoreConfig) -> StoreResult<Self> {
        let backend = SqliteSlotBackend::open(&config.db_path)?;
        info!(
            "event=stores_open module=stores status=ok db_path={} persistence={}",
            config.db_path.display(),
            config.persistence.as_str()
        );
        Ok(Self::with_options(
            SharedBackend::new(backend),
            Arc::new(SystemClock),
            config.persistence,
        ))
    }

    /// Stores over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(SharedBackend::in_memory())
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.items.clone(), self.movements.clone())
    }

    pub fn finance(&self) -> AccountService {
        AccountService::new(self.accounts.clone())
    }

    pub fn purchasing(&self) -> PurchaseOrderService {
        PurchaseOrderService::new(self.purchase_orders.clone())
    }

    /// `(slot key, record count)` for every kind, in a fixed order.
    pub fn slot_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (InventoryItem::STORE_KEY, self.items.count()),
            (StockMovement::STORE_KEY, self.movements.count()),
            (Supplier::STORE_KEY, self.suppliers.count()),
            (Account::STORE_KEY, self.accounts.count()),
            (Activity::STORE_KEY, self.activities.count()),
            (Resource::STORE_KEY, self.resources.count()),
            (Employee::STORE_KEY, self.employees.count()),
            (Sale::STORE_KEY, self.sales.count()),
            (PurchaseOrder::STORE_KEY, self.purchase_orders.count()),
        ]
    }
}

fn manager<T: Record>(
    backend: &SharedBackend,
    clock: &Arc<dyn Clock>,
    policy: PersistencePolicy,
) -> CollectionManager<T> {
    CollectionManager::new(backend)
        .with_clock(Arc::clone(clock))
        .with_policy(policy)
}
