//! Data-driven plant loading from JSON.
//!
//! Feature-gated behind `data-loader`. Deserializes resource, store, and
//! factory definitions from data files and resolves name references into a
//! ready-to-tick [`Plant`]. This is configuration input -- all
//! construction-time validation (unknown references, non-positive durations)
//! runs here, so a loaded plant never fails mid-tick.

use crate::catalog::{CatalogBuilder, CatalogError, ResourceCatalog};
use crate::factory::{Factory, FactoryConfig};
use crate::fixed::f64_to_seconds;
use crate::id::{FactoryId, StoreId};
use crate::plant::Plant;
use crate::recipe::{InputRequirement, Recipe, RecipeError};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("recipe error: {0}")]
    Recipe(#[from] RecipeError),
    #[error("unknown resource reference: {0}")]
    UnknownResourceRef(String),
    #[error("unknown store reference: {0}")]
    UnknownStoreRef(String),
    #[error("duplicate store name: {0}")]
    DuplicateStoreName(String),
    #[error("duplicate factory name: {0}")]
    DuplicateFactoryName(String),
    #[error("cool-down must be non-negative, got {0}")]
    NegativeCoolDown(f64),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level plant data structure for JSON deserialization.
#[derive(Debug, serde::Deserialize)]
pub struct PlantData {
    #[serde(default)]
    pub resources: Vec<ResourceData>,
    #[serde(default)]
    pub stores: Vec<StoreData>,
    #[serde(default)]
    pub factories: Vec<FactoryData>,
}

/// JSON representation of a resource kind.
#[derive(Debug, serde::Deserialize)]
pub struct ResourceData {
    pub name: String,
}

/// JSON representation of a resource store.
#[derive(Debug, serde::Deserialize)]
pub struct StoreData {
    pub name: String,
    pub resource: String, // references resource by name
    #[serde(default)]
    pub initial: u64,
}

/// JSON representation of a factory.
#[derive(Debug, serde::Deserialize)]
pub struct FactoryData {
    pub name: String,
    pub recipe: RecipeData,
    #[serde(default = "default_cool_down")]
    pub cool_down_secs: f64,
    #[serde(default)]
    pub queue_gated: bool,
}

fn default_cool_down() -> f64 {
    5.0
}

/// JSON representation of a bill of materials.
#[derive(Debug, serde::Deserialize)]
pub struct RecipeData {
    #[serde(default)]
    pub inputs: Vec<InputData>,
    pub output_store: String, // references store by name
    pub quantity: u64,
    pub duration_secs: f64,
}

/// JSON representation of a recipe input line.
#[derive(Debug, serde::Deserialize)]
pub struct InputData {
    pub store: String, // references store by name
    pub quantity: u64,
}

// ---------------------------------------------------------------------------
// Loaded plant
// ---------------------------------------------------------------------------

/// A plant built from data, plus the name maps the host needs for lookups.
#[derive(Debug)]
pub struct LoadedPlant {
    pub catalog: ResourceCatalog,
    pub plant: Plant,
    pub stores: HashMap<String, StoreId>,
    pub factories: HashMap<String, FactoryId>,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load a plant from a JSON string.
pub fn load_plant_json(json: &str) -> Result<LoadedPlant, DataLoadError> {
    let data: PlantData = serde_json::from_str(json)?;
    build_plant(data)
}

/// Load a plant from JSON bytes.
pub fn load_plant_json_bytes(bytes: &[u8]) -> Result<LoadedPlant, DataLoadError> {
    let data: PlantData = serde_json::from_slice(bytes)?;
    build_plant(data)
}

fn build_plant(data: PlantData) -> Result<LoadedPlant, DataLoadError> {
    // Phase 1: register all resource kinds.
    let mut builder = CatalogBuilder::new();
    for resource in &data.resources {
        builder.register_resource(&resource.name);
    }
    let catalog = builder.build()?;

    // Phase 2: create all stores (resolve resource refs by name).
    let mut plant = Plant::new();
    let mut stores: HashMap<String, StoreId> = HashMap::new();
    for store in &data.stores {
        let resource = catalog
            .resource_id(&store.resource)
            .ok_or_else(|| DataLoadError::UnknownResourceRef(store.resource.clone()))?;
        let id = plant.warehouse.create_store(resource, store.initial);
        if stores.insert(store.name.clone(), id).is_some() {
            return Err(DataLoadError::DuplicateStoreName(store.name.clone()));
        }
    }

    // Phase 3: build all factories (resolve store refs by name).
    let mut factories: HashMap<String, FactoryId> = HashMap::new();
    for factory in &data.factories {
        if factory.cool_down_secs < 0.0 {
            return Err(DataLoadError::NegativeCoolDown(factory.cool_down_secs));
        }

        let mut inputs = Vec::new();
        for input in &factory.recipe.inputs {
            let store = *stores
                .get(&input.store)
                .ok_or_else(|| DataLoadError::UnknownStoreRef(input.store.clone()))?;
            inputs.push(InputRequirement {
                store,
                quantity: input.quantity,
            });
        }
        let output_store = *stores
            .get(&factory.recipe.output_store)
            .ok_or_else(|| DataLoadError::UnknownStoreRef(factory.recipe.output_store.clone()))?;

        let recipe = Recipe::new(
            inputs,
            output_store,
            factory.recipe.quantity,
            f64_to_seconds(factory.recipe.duration_secs),
            &plant.warehouse,
        )?;
        let config = FactoryConfig {
            cool_down: f64_to_seconds(factory.cool_down_secs),
            queue_gated: factory.queue_gated,
        };

        let id = plant.add_factory(Factory::new(recipe, config));
        if factories.insert(factory.name.clone(), id).is_some() {
            return Err(DataLoadError::DuplicateFactoryName(factory.name.clone()));
        }
    }

    Ok(LoadedPlant {
        catalog,
        plant,
        stores,
        factories,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
