use crate::id::{ResourceId, StoreId};
use slotmap::SlotMap;

/// A mutable quantity counter bound to exactly one resource kind.
///
/// The quantity is unsigned, so it can never go negative; additions saturate
/// instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStore {
    resource: ResourceId,
    quantity: u64,
}

impl ResourceStore {
    pub fn new(resource: ResourceId, initial: u64) -> Self {
        Self {
            resource,
            quantity: initial,
        }
    }

    /// The resource kind this store counts.
    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn add_quantity(&mut self, n: u64) {
        self.quantity = self.quantity.saturating_add(n);
    }

    pub fn has_quantity(&self, n: u64) -> bool {
        self.quantity >= n
    }

    /// Check-then-subtract. Mutates and returns true only if the full amount
    /// was available beforehand; otherwise leaves the store untouched and
    /// returns false. No partial consumption.
    pub fn use_quantity(&mut self, n: u64) -> bool {
        if self.has_quantity(n) {
            self.quantity -= n;
            true
        } else {
            false
        }
    }
}

/// Owns every store in a simulation, keyed by [`StoreId`].
///
/// Stores are created at world-build time and never destroyed mid-run. A
/// single store may be referenced by any number of recipes -- a shared
/// warehouse resource feeding multiple factories is a supported pattern.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    stores: SlotMap<StoreId, ResourceStore>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store for a resource kind with an initial quantity.
    pub fn create_store(&mut self, resource: ResourceId, initial: u64) -> StoreId {
        self.stores.insert(ResourceStore::new(resource, initial))
    }

    pub fn store(&self, id: StoreId) -> Option<&ResourceStore> {
        self.stores.get(id)
    }

    pub fn store_mut(&mut self, id: StoreId) -> Option<&mut ResourceStore> {
        self.stores.get_mut(id)
    }

    pub fn contains(&self, id: StoreId) -> bool {
        self.stores.contains_key(id)
    }

    /// Current quantity of a store, or 0 for an unknown id.
    pub fn quantity(&self, id: StoreId) -> u64 {
        self.stores.get(id).map(|s| s.quantity()).unwrap_or(0)
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }
}
