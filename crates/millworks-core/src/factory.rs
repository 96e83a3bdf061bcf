use crate::fixed::{Fixed64, Seconds, seconds_to_f64};
use crate::recipe::{Produced, Recipe};
use crate::store::Warehouse;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// State and configuration
// ---------------------------------------------------------------------------

/// What a factory is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryState {
    /// Waiting for inputs (and, for queue-gated factories, a queued request).
    #[default]
    Idle,
    /// A production cycle is in progress.
    Working,
    /// Inputs were insufficient; waiting before the next availability check.
    CoolingDown,
}

/// Per-factory configuration, supplied at construction and immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    /// Seconds to wait between availability re-checks while starved.
    /// Must be non-negative.
    pub cool_down: Seconds,
    /// When set, production only starts while the enqueue counter is
    /// non-zero; each started cycle decrements the counter by one.
    pub queue_gated: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            cool_down: Seconds::from_num(5),
            queue_gated: false,
        }
    }
}

/// Continuously-readable status snapshot for host observers (UI, animation).
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryStatus {
    pub state: FactoryState,
    /// Completion percentage of the current cycle, 0-100.
    pub percentage: Fixed64,
    pub queue_depth: u32,
    /// Human-readable, advisory only. Never parse this.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// The per-instance production state machine.
///
/// One `Factory` per physical factory. The host drives it once per frame via
/// [`Factory::tick`] with the elapsed-time delta; between ticks it may queue
/// production requests with [`Factory::enqueue`]. All failure (insufficient
/// resources) is modeled as the CoolingDown state with automatic retry --
/// there are no fatal errors at tick time.
#[derive(Debug, Clone)]
pub struct Factory {
    recipe: Recipe,
    config: FactoryConfig,
    state: FactoryState,
    /// Elapsed time in the current Working cycle.
    elapsed: Seconds,
    percentage: Fixed64,
    cool_down_elapsed: Seconds,
    queue_depth: u32,
    message: String,
}

impl Factory {
    pub fn new(recipe: Recipe, config: FactoryConfig) -> Self {
        Self {
            recipe,
            config,
            state: FactoryState::Idle,
            elapsed: Seconds::from_num(0),
            percentage: Fixed64::from_num(0),
            cool_down_elapsed: Seconds::from_num(0),
            queue_depth: 0,
            message: String::new(),
        }
    }

    pub fn state(&self) -> FactoryState {
        self.state
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Completion percentage of the current cycle, 0-100.
    pub fn percentage(&self) -> Fixed64 {
        self.percentage
    }

    pub fn queue_depth(&self) -> u32 {
        self.queue_depth
    }

    /// Queue one production request. Only gates the Idle -> Working
    /// transition of queue-gated factories; it has no other effect on
    /// production logic.
    pub fn enqueue(&mut self) {
        self.queue_depth = self.queue_depth.saturating_add(1);
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> FactoryStatus {
        FactoryStatus {
            state: self.state,
            percentage: self.percentage,
            queue_depth: self.queue_depth,
            message: self.message.clone(),
        }
    }

    /// Advance the factory by one frame.
    ///
    /// Returns the produced payload when a cycle completed this tick -- at
    /// most once per Working -> Idle transition.
    pub fn tick(&mut self, dt: Seconds, warehouse: &mut Warehouse) -> Option<Produced> {
        match self.state {
            FactoryState::Idle => {
                self.tick_idle(warehouse);
                None
            }
            FactoryState::Working => self.tick_working(dt, warehouse),
            FactoryState::CoolingDown => {
                self.tick_cooling_down(dt, warehouse);
                None
            }
        }
    }

    fn tick_idle(&mut self, warehouse: &mut Warehouse) {
        if self.config.queue_gated && self.queue_depth == 0 {
            self.message = "queue empty".to_string();
            return;
        }

        if self.recipe.can_produce(warehouse) {
            if self.config.queue_gated {
                self.queue_depth -= 1;
            }
            self.recipe.consume_inputs(warehouse);
            self.elapsed = Seconds::from_num(0);
            self.state = FactoryState::Working;
        } else {
            self.cool_down_elapsed = Seconds::from_num(0);
            self.state = FactoryState::CoolingDown;
            self.message = "insufficient resources, entering cool-down".to_string();
        }
    }

    fn tick_working(&mut self, dt: Seconds, warehouse: &mut Warehouse) -> Option<Produced> {
        self.elapsed += dt;
        // Duration is strictly positive, validated at recipe construction.
        self.percentage = self.elapsed / self.recipe.duration() * Fixed64::from_num(100);

        if self.recipe.is_time_to_produce(self.elapsed) {
            self.elapsed = Seconds::from_num(0);
            self.percentage = Fixed64::from_num(0);
            let produced = self.recipe.produce_output(warehouse);
            self.state = FactoryState::Idle;
            Some(produced)
        } else {
            self.message = format!("working, {}%", self.percentage.round().to_num::<i64>());
            None
        }
    }

    fn tick_cooling_down(&mut self, dt: Seconds, warehouse: &Warehouse) {
        self.cool_down_elapsed += dt;
        if self.cool_down_elapsed > self.config.cool_down {
            self.cool_down_elapsed = Seconds::from_num(0);
            if self.recipe.can_produce(warehouse) {
                self.state = FactoryState::Idle;
            }
        } else {
            self.message = format!(
                "cooling down, {:.2} s elapsed",
                seconds_to_f64(self.cool_down_elapsed)
            );
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::InputRequirement;
    use crate::test_utils::*;

    fn wood_to_plank(warehouse: &mut Warehouse) -> Recipe {
        // 2 wood -> 3 planks, 2 seconds.
        let wood_pile = warehouse.create_store(wood(), 5);
        let plank_pile = warehouse.create_store(plank(), 0);
        Recipe::new(
            vec![InputRequirement {
                store: wood_pile,
                quantity: 2,
            }],
            plank_pile,
            3,
            secs(2.0),
            warehouse,
        )
        .expect("valid test recipe")
    }

    // -----------------------------------------------------------------------
    // Idle -> Working -> Idle with one output event
    // -----------------------------------------------------------------------
    #[test]
    fn full_cycle_produces_exactly_once() {
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let wood_pile = recipe.inputs()[0].store;
        let plank_pile = recipe.output_store();
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        // Tick 1: consume inputs, start working. No time accrues yet.
        assert!(factory.tick(secs(1.0), &mut warehouse).is_none());
        assert_eq!(factory.state(), FactoryState::Working);
        assert_eq!(warehouse.quantity(wood_pile), 3);

        // Tick 2: halfway.
        assert!(factory.tick(secs(1.0), &mut warehouse).is_none());
        assert_eq!(factory.state(), FactoryState::Working);
        assert_eq!(factory.percentage(), fixed(50.0));

        // Tick 3: past the duration -- produce and return to Idle.
        let produced = factory.tick(secs(1.01), &mut warehouse);
        assert_eq!(
            produced,
            Some(crate::recipe::Produced {
                resource: plank(),
                quantity: 3,
            })
        );
        assert_eq!(factory.state(), FactoryState::Idle);
        assert_eq!(factory.percentage(), fixed(0.0));
        assert_eq!(warehouse.quantity(plank_pile), 3);
        assert_eq!(warehouse.quantity(wood_pile), 3);
    }

    #[test]
    fn working_at_exact_duration_does_not_complete() {
        // Completion is strictly greater-than the duration.
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        factory.tick(secs(1.0), &mut warehouse);
        let produced = factory.tick(secs(2.0), &mut warehouse);
        assert!(produced.is_none());
        assert_eq!(factory.state(), FactoryState::Working);
        assert_eq!(factory.percentage(), fixed(100.0));
    }

    #[test]
    fn working_status_message_reports_percentage() {
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        factory.tick(secs(1.0), &mut warehouse);
        factory.tick(secs(1.0), &mut warehouse);
        let status = factory.status();
        assert_eq!(status.state, FactoryState::Working);
        assert_eq!(status.message, "working, 50%");
    }

    // -----------------------------------------------------------------------
    // Starvation and cool-down retry
    // -----------------------------------------------------------------------
    #[test]
    fn starved_factory_enters_cool_down() {
        let mut warehouse = Warehouse::new();
        let ore_pile = warehouse.create_store(ore(), 0);
        let ingot_pile = warehouse.create_store(ingot(), 0);
        let recipe = Recipe::new(
            vec![InputRequirement {
                store: ore_pile,
                quantity: 10,
            }],
            ingot_pile,
            1,
            secs(1.0),
            &warehouse,
        )
        .unwrap();
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(3.0),
                queue_gated: false,
            },
        );

        factory.tick(secs(0.5), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::CoolingDown);
        assert_eq!(
            factory.status().message,
            "insufficient resources, entering cool-down"
        );
    }

    #[test]
    fn cool_down_recheck_fails_while_still_starved() {
        let mut warehouse = Warehouse::new();
        let ore_pile = warehouse.create_store(ore(), 0);
        let ingot_pile = warehouse.create_store(ingot(), 0);
        let recipe = Recipe::new(
            vec![InputRequirement {
                store: ore_pile,
                quantity: 10,
            }],
            ingot_pile,
            1,
            secs(1.0),
            &warehouse,
        )
        .unwrap();
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(3.0),
                queue_gated: false,
            },
        );

        factory.tick(secs(1.0), &mut warehouse);
        // 3.1 s cumulative cool-down: threshold exceeded, re-check fails.
        for _ in 0..31 {
            factory.tick(secs(0.1), &mut warehouse);
        }
        assert_eq!(factory.state(), FactoryState::CoolingDown);
    }

    #[test]
    fn cool_down_recovers_once_resources_appear() {
        let mut warehouse = Warehouse::new();
        let ore_pile = warehouse.create_store(ore(), 0);
        let ingot_pile = warehouse.create_store(ingot(), 0);
        let recipe = Recipe::new(
            vec![InputRequirement {
                store: ore_pile,
                quantity: 10,
            }],
            ingot_pile,
            1,
            secs(1.0),
            &warehouse,
        )
        .unwrap();
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(3.0),
                queue_gated: false,
            },
        );

        factory.tick(secs(1.0), &mut warehouse);
        factory.tick(secs(3.1), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::CoolingDown);

        warehouse.store_mut(ore_pile).unwrap().add_quantity(10);
        // Re-check only happens once the threshold is exceeded again.
        factory.tick(secs(1.0), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::CoolingDown);
        factory.tick(secs(2.2), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::Idle);
    }

    #[test]
    fn cool_down_message_reports_elapsed_time() {
        let mut warehouse = Warehouse::new();
        let ore_pile = warehouse.create_store(ore(), 0);
        let ingot_pile = warehouse.create_store(ingot(), 0);
        let recipe = Recipe::new(
            vec![InputRequirement {
                store: ore_pile,
                quantity: 1,
            }],
            ingot_pile,
            1,
            secs(1.0),
            &warehouse,
        )
        .unwrap();
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        factory.tick(secs(1.0), &mut warehouse);
        factory.tick(secs(1.5), &mut warehouse);
        assert_eq!(factory.status().message, "cooling down, 1.50 s elapsed");
    }

    // -----------------------------------------------------------------------
    // Queue gating
    // -----------------------------------------------------------------------
    #[test]
    fn queue_gated_factory_waits_for_enqueue() {
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(5.0),
                queue_gated: true,
            },
        );

        // Resources are plentiful, but the queue is empty: never leaves Idle.
        for _ in 0..10 {
            factory.tick(secs(1.0), &mut warehouse);
            assert_eq!(factory.state(), FactoryState::Idle);
        }
        assert_eq!(factory.status().message, "queue empty");

        factory.enqueue();
        assert_eq!(factory.queue_depth(), 1);
        factory.tick(secs(1.0), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::Working);
        assert_eq!(factory.queue_depth(), 0);
    }

    #[test]
    fn queue_depth_counts_multiple_requests() {
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(5.0),
                queue_gated: true,
            },
        );

        factory.enqueue();
        factory.enqueue();
        factory.enqueue();
        assert_eq!(factory.queue_depth(), 3);

        // Only one unit is in flight at a time regardless of depth.
        factory.tick(secs(1.0), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::Working);
        assert_eq!(factory.queue_depth(), 2);
    }

    #[test]
    fn queue_gated_starvation_still_cools_down() {
        let mut warehouse = Warehouse::new();
        let ore_pile = warehouse.create_store(ore(), 0);
        let ingot_pile = warehouse.create_store(ingot(), 0);
        let recipe = Recipe::new(
            vec![InputRequirement {
                store: ore_pile,
                quantity: 5,
            }],
            ingot_pile,
            1,
            secs(1.0),
            &warehouse,
        )
        .unwrap();
        let mut factory = Factory::new(
            recipe,
            FactoryConfig {
                cool_down: secs(2.0),
                queue_gated: true,
            },
        );

        factory.enqueue();
        factory.tick(secs(1.0), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::CoolingDown);
        // The request was not consumed -- starting a cycle is what decrements.
        assert_eq!(factory.queue_depth(), 1);
    }

    // -----------------------------------------------------------------------
    // Free production
    // -----------------------------------------------------------------------
    #[test]
    fn empty_input_recipe_produces_from_nothing() {
        let mut warehouse = Warehouse::new();
        let gear_pile = warehouse.create_store(gear(), 0);
        let recipe = Recipe::new(vec![], gear_pile, 2, secs(1.0), &warehouse).unwrap();
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        factory.tick(secs(1.0), &mut warehouse);
        assert_eq!(factory.state(), FactoryState::Working);
        let produced = factory.tick(secs(1.1), &mut warehouse);
        assert!(produced.is_some());
        assert_eq!(warehouse.quantity(gear_pile), 2);
    }

    #[test]
    fn repeated_cycles_keep_producing() {
        let mut warehouse = Warehouse::new();
        let recipe = wood_to_plank(&mut warehouse);
        let wood_pile = recipe.inputs()[0].store;
        let plank_pile = recipe.output_store();
        let mut factory = Factory::new(recipe, FactoryConfig::default());

        // 5 wood covers two cycles of 2; the third attempt starves.
        let mut completions = 0;
        for _ in 0..20 {
            if factory.tick(secs(1.1), &mut warehouse).is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 2);
        assert_eq!(warehouse.quantity(wood_pile), 1);
        assert_eq!(warehouse.quantity(plank_pile), 6);
        assert_eq!(factory.state(), FactoryState::CoolingDown);
    }
}
