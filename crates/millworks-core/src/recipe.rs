use crate::fixed::Seconds;
use crate::id::{ResourceId, StoreId};
use crate::store::Warehouse;

/// One input line of a bill of materials. Lives inside exactly one recipe's
/// input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRequirement {
    pub store: StoreId,
    pub quantity: u64,
}

/// The payload reported when a production cycle completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Produced {
    pub resource: ResourceId,
    pub quantity: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe duration must be positive, got {0}")]
    NonPositiveDuration(Seconds),
    #[error("recipe references unknown store: {0:?}")]
    UnknownStore(StoreId),
}

/// An immutable bill of materials: a set of input requirements, one output
/// store, an output quantity, and a production duration.
///
/// Treated as configuration data -- validated at construction and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Recipe {
    inputs: Vec<InputRequirement>,
    output_store: StoreId,
    output_resource: ResourceId,
    output_quantity: u64,
    duration: Seconds,
}

impl Recipe {
    /// Build a recipe against the warehouse that owns its stores.
    ///
    /// Fails fast on configuration errors: a non-positive duration or a store
    /// reference the warehouse does not know.
    pub fn new(
        inputs: Vec<InputRequirement>,
        output_store: StoreId,
        output_quantity: u64,
        duration: Seconds,
        warehouse: &Warehouse,
    ) -> Result<Self, RecipeError> {
        if duration <= Seconds::from_num(0) {
            return Err(RecipeError::NonPositiveDuration(duration));
        }
        for requirement in &inputs {
            if !warehouse.contains(requirement.store) {
                return Err(RecipeError::UnknownStore(requirement.store));
            }
        }
        let output_resource = warehouse
            .store(output_store)
            .ok_or(RecipeError::UnknownStore(output_store))?
            .resource();

        Ok(Self {
            inputs,
            output_store,
            output_resource,
            output_quantity,
            duration,
        })
    }

    pub fn inputs(&self) -> &[InputRequirement] {
        &self.inputs
    }

    pub fn output_store(&self) -> StoreId {
        self.output_store
    }

    pub fn output_resource(&self) -> ResourceId {
        self.output_resource
    }

    pub fn output_quantity(&self) -> u64 {
        self.output_quantity
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    /// True when the input list is empty or every requirement is currently
    /// met. An empty-input recipe is always satisfiable -- free production is
    /// a valid configuration, not an error.
    pub fn can_produce(&self, warehouse: &Warehouse) -> bool {
        self.inputs.iter().all(|requirement| {
            warehouse
                .store(requirement.store)
                .is_some_and(|store| store.has_quantity(requirement.quantity))
        })
    }

    /// Draw every input from its store, in list order.
    ///
    /// Callers check [`Recipe::can_produce`] first; there is no re-validation
    /// here and no rollback across inputs. Each individual store still
    /// refuses to go negative.
    pub fn consume_inputs(&self, warehouse: &mut Warehouse) {
        for requirement in &self.inputs {
            if let Some(store) = warehouse.store_mut(requirement.store) {
                store.use_quantity(requirement.quantity);
            }
        }
    }

    /// Credit the output store and report what was produced.
    pub fn produce_output(&self, warehouse: &mut Warehouse) -> Produced {
        if let Some(store) = warehouse.store_mut(self.output_store) {
            store.add_quantity(self.output_quantity);
        }
        Produced {
            resource: self.output_resource,
            quantity: self.output_quantity,
        }
    }

    /// Whether a cycle that has been running for `elapsed` is finished.
    /// Strictly greater than the duration.
    pub fn is_time_to_produce(&self, elapsed: Seconds) -> bool {
        elapsed > self.duration
    }
}
