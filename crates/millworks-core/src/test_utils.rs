//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::{CatalogBuilder, ResourceCatalog};
use crate::factory::{Factory, FactoryConfig};
use crate::fixed::{Fixed64, Seconds};
use crate::id::{ResourceId, StoreId};
use crate::recipe::{InputRequirement, Recipe};
use crate::store::Warehouse;

// ===========================================================================
// Fixed-point helpers
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

pub fn secs(v: f64) -> Seconds {
    Seconds::from_num(v)
}

// ===========================================================================
// Resource kinds
// ===========================================================================

pub fn wood() -> ResourceId {
    ResourceId(0)
}
pub fn plank() -> ResourceId {
    ResourceId(1)
}
pub fn ore() -> ResourceId {
    ResourceId(2)
}
pub fn ingot() -> ResourceId {
    ResourceId(3)
}
pub fn gear() -> ResourceId {
    ResourceId(4)
}

/// A catalog naming the canonical test resources, ids matching the helpers
/// above.
pub fn test_catalog() -> ResourceCatalog {
    let mut builder = CatalogBuilder::new();
    builder.register_resource("wood");
    builder.register_resource("plank");
    builder.register_resource("ore");
    builder.register_resource("ingot");
    builder.register_resource("gear");
    builder.build().expect("test catalog builds")
}

// ===========================================================================
// Recipe and factory constructors
// ===========================================================================

/// Build a validated recipe from `(store, quantity)` input pairs.
pub fn simple_recipe(
    warehouse: &Warehouse,
    inputs: Vec<(StoreId, u64)>,
    output_store: StoreId,
    output_quantity: u64,
    duration_secs: f64,
) -> Recipe {
    let inputs = inputs
        .into_iter()
        .map(|(store, quantity)| InputRequirement { store, quantity })
        .collect();
    Recipe::new(
        inputs,
        output_store,
        output_quantity,
        secs(duration_secs),
        warehouse,
    )
    .expect("valid test recipe")
}

/// A factory with the default configuration (5 s cool-down, not
/// queue-gated).
pub fn simple_factory(recipe: Recipe) -> Factory {
    Factory::new(recipe, FactoryConfig::default())
}

/// A queue-gated factory with the given cool-down.
pub fn queue_factory(recipe: Recipe, cool_down_secs: f64) -> Factory {
    Factory::new(
        recipe,
        FactoryConfig {
            cool_down: secs(cool_down_secs),
            queue_gated: true,
        },
    )
}
