use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a resource store inside a warehouse.
    pub struct StoreId;

    /// Identifies a factory inside a plant.
    pub struct FactoryId;
}

/// Identifies a resource kind in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);
