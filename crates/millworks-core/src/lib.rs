//! Millworks Core -- a production-chain simulation core for factory games.
//!
//! This crate provides resource stores, bills of materials, and the
//! per-factory state machine that every Millworks game depends on. The host
//! simulation loop drives each factory once per frame with an elapsed-time
//! delta; the core decides whether production can start, consumes inputs,
//! advances a timer, credits outputs, and handles resource starvation with a
//! cool-down retry loop.
//!
//! # Tick Lifecycle
//!
//! Each call to [`plant::Plant::advance`] (or [`factory::Factory::tick`] when
//! driving a single factory directly) moves the factory state machine through
//! one frame:
//!
//! 1. **Idle** -- If the factory is queue-gated, an empty queue blocks
//!    production. Otherwise the recipe's inputs are checked; when satisfied
//!    they are consumed and the factory starts Working, when starved the
//!    factory enters CoolingDown.
//! 2. **Working** -- The in-cycle timer advances by `dt`. Once it exceeds the
//!    recipe duration, the output store is credited and an
//!    [`event::Event::ItemProduced`] is raised.
//! 3. **CoolingDown** -- The cool-down timer advances by `dt`. Each time it
//!    exceeds the configured threshold, input availability is re-checked;
//!    the factory retries indefinitely until resources appear.
//!
//! # Key Types
//!
//! - [`store::Warehouse`] -- Owns every [`store::ResourceStore`]; a store may
//!   be shared by any number of recipes and factories.
//! - [`recipe::Recipe`] -- Immutable bill of materials: input requirements,
//!   output store, output quantity, and production duration.
//! - [`factory::Factory`] -- The Idle / Working / CoolingDown state machine,
//!   with an optional production queue gate and a status snapshot.
//! - [`plant::Plant`] -- Ticks a set of factories sequentially against the
//!   shared warehouse and delivers buffered events.
//! - [`catalog::ResourceCatalog`] -- Immutable registry of resource kinds
//!   (frozen at startup).
//! - [`fixed::Seconds`] -- Q32.32 fixed-point seconds for deterministic time.

pub mod catalog;
#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod event;
pub mod factory;
pub mod fixed;
pub mod id;
pub mod plant;
pub mod recipe;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
