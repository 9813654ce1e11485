use std::path::Path;

use crate::config::load_registry;
use crate::core::{
    clock::Clock,
    ordering::{OrderingController, SortField, SortState},
    services::{AggregateViews, PurchaseService, ServiceResult, SummaryService},
};
use crate::domain::{CategoryRegistry, Purchase, PurchaseDraft, PurchaseRef, PurchaseStore};
use crate::storage::{load_store, save_store, StorageBackend};

/// Facade that owns the purchase store, category registry, sort state and
/// derived views, and keeps them consistent with persistence.
pub struct TrackerManager {
    store: PurchaseStore,
    registry: CategoryRegistry,
    ordering: OrderingController,
    views: AggregateViews,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl TrackerManager {
    /// Starts from an empty store without reading storage.
    pub fn new(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let mut manager = Self {
            store: PurchaseStore::new(),
            registry: CategoryRegistry::empty(),
            ordering: OrderingController::new(),
            views: AggregateViews::default(),
            storage,
            clock,
        };
        manager.recompute();
        manager
    }

    /// Restores the persisted store. Absent or unreadable data starts empty.
    pub fn open(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let mut manager = Self::new(storage, clock);
        match load_store(manager.storage.as_ref()) {
            Ok(Some(store)) => {
                tracing::info!(purchases = store.len(), "restored purchase store");
                manager.store = store;
            }
            Ok(None) => tracing::info!("no stored purchases, starting empty"),
            Err(err) => tracing::warn!(error = %err, "discarding unreadable purchase store"),
        }
        manager.recompute();
        manager
    }

    /// Replaces the registry (e.g. once a deferred load resolves) and re-aggregates.
    pub fn install_registry(&mut self, registry: CategoryRegistry) {
        tracing::debug!(categories = registry.len(), "category registry installed");
        self.registry = registry;
        self.recompute();
    }

    /// Loads the registry from `path`; failures keep aggregation running on fallback metadata.
    pub fn load_registry_from(&mut self, path: &Path) {
        match load_registry(path) {
            Ok(registry) => self.install_registry(registry),
            Err(err) => {
                tracing::warn!(error = %err, "category registry unavailable, using fallback metadata");
                self.install_registry(CategoryRegistry::empty());
            }
        }
    }

    /// Validates and appends a purchase, persists, then recomputes every view.
    ///
    /// Nothing changes in memory when validation or the write fails.
    pub fn add(&mut self, draft: PurchaseDraft) -> ServiceResult<Purchase> {
        let mut candidate = self.store.clone();
        let purchase = PurchaseService::add(&mut candidate, draft)?;
        save_store(self.storage.as_ref(), &candidate)?;
        self.store = candidate;
        tracing::info!(
            purchase_id = %purchase.id,
            name = %purchase.name,
            price = purchase.price,
            installments = purchase.installments,
            "purchase added"
        );
        self.recompute();
        Ok(purchase)
    }

    /// Removes by id or canonical index. Absent targets are a no-op returning `None`.
    pub fn remove(&mut self, target: impl Into<PurchaseRef>) -> ServiceResult<Option<Purchase>> {
        let mut candidate = self.store.clone();
        let Some(removed) = PurchaseService::remove(&mut candidate, target) else {
            return Ok(None);
        };
        save_store(self.storage.as_ref(), &candidate)?;
        self.store = candidate;
        tracing::info!(purchase_id = %removed.id, name = %removed.name, "purchase removed");
        self.recompute();
        Ok(Some(removed))
    }

    fn recompute(&mut self) {
        let today = self.clock.today();
        self.views = SummaryService::aggregate(self.store.all(), &self.registry, today);
        tracing::debug!(
            purchases = self.store.len(),
            months = self.views.monthly.months.len(),
            "aggregate views recomputed"
        );
    }

    /// Purchases in canonical (insertion) order.
    pub fn purchases(&self) -> &[Purchase] {
        self.store.all()
    }

    /// Purchases in the current display order.
    pub fn sorted_purchases(&self) -> Vec<&Purchase> {
        self.ordering.apply(self.store.all())
    }

    pub fn sort_by(&mut self, field: SortField) -> Option<SortState> {
        self.ordering.sort_by(field)
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.ordering.state()
    }

    pub fn views(&self) -> &AggregateViews {
        &self.views
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }
}
