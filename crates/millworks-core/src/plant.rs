//! Plant orchestration: ticks a set of factories against a shared warehouse.
//!
//! Ticking is strictly sequential -- one factory at a time, in a stable
//! order -- so store mutation is serialized and the never-negative store
//! invariant holds even when several factories draw on the same store within
//! one frame. Single-threaded and cooperative by design; no locks.

use crate::event::{Event, EventBus};
use crate::factory::{Factory, FactoryState};
use crate::fixed::Seconds;
use crate::id::FactoryId;
use crate::recipe::Produced;
use crate::store::Warehouse;
use slotmap::SlotMap;

/// Default per-kind event buffer capacity.
const DEFAULT_EVENT_CAPACITY: usize = 128;

/// A warehouse plus the factories drawing on it.
///
/// The host drives the whole plant once per frame with
/// [`Plant::advance`]. Factories are independent state machines; the only
/// shared mutable state is the warehouse, and sharing a store between
/// factories is a supported pattern.
#[derive(Debug)]
pub struct Plant {
    pub warehouse: Warehouse,
    factories: SlotMap<FactoryId, Factory>,
    pub events: EventBus,
}

impl Plant {
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            warehouse: Warehouse::new(),
            factories: SlotMap::with_key(),
            events: EventBus::new(capacity),
        }
    }

    pub fn add_factory(&mut self, factory: Factory) -> FactoryId {
        self.factories.insert(factory)
    }

    pub fn remove_factory(&mut self, id: FactoryId) -> Option<Factory> {
        self.factories.remove(id)
    }

    pub fn factory(&self, id: FactoryId) -> Option<&Factory> {
        self.factories.get(id)
    }

    pub fn factory_mut(&mut self, id: FactoryId) -> Option<&mut Factory> {
        self.factories.get_mut(id)
    }

    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }

    /// Queue one production request on a factory. Returns false for an
    /// unknown id.
    pub fn enqueue(&mut self, id: FactoryId) -> bool {
        match self.factories.get_mut(id) {
            Some(factory) => {
                factory.enqueue();
                true
            }
            None => false,
        }
    }

    /// Advance every factory by `dt`, one at a time, then deliver buffered
    /// events to listeners.
    ///
    /// Returns the completions of this frame in tick order; the same
    /// payloads are also emitted as [`Event::ItemProduced`].
    pub fn advance(&mut self, dt: Seconds) -> Vec<(FactoryId, Produced)> {
        let mut completed = Vec::new();

        for (id, factory) in &mut self.factories {
            let before = factory.state();
            let produced = factory.tick(dt, &mut self.warehouse);
            let after = factory.state();

            if let Some(payload) = produced {
                self.events.emit(Event::ItemProduced {
                    factory: id,
                    resource: payload.resource,
                    quantity: payload.quantity,
                });
                completed.push((id, payload));
            }

            match (before, after) {
                (FactoryState::Idle, FactoryState::Working) => {
                    self.events.emit(Event::ProductionStarted { factory: id });
                }
                (FactoryState::Idle, FactoryState::CoolingDown) => {
                    self.events.emit(Event::FactoryStalled { factory: id });
                }
                (FactoryState::CoolingDown, FactoryState::Idle) => {
                    self.events.emit(Event::FactoryResumed { factory: id });
                }
                _ => {}
            }
        }

        self.events.deliver();
        completed
    }
}

impl Default for Plant {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
