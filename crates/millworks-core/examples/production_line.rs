//! Production line example: a sawmill feeding a gear workshop.
//!
//! Creates a shared warehouse with a wood pile, a plank pile, and a gear
//! bin, then chains two factories through the plank pile and runs 20 frames.
//! After each frame, prints every factory's status snapshot.
//!
//! Run with: `cargo run -p millworks-core --example production_line`

use millworks_core::catalog::CatalogBuilder;
use millworks_core::event::{Event, EventKind};
use millworks_core::factory::{Factory, FactoryConfig};
use millworks_core::fixed::f64_to_seconds;
use millworks_core::plant::Plant;
use millworks_core::recipe::{InputRequirement, Recipe};

fn main() {
    // --- Step 1: Name the resource kinds ---

    let mut builder = CatalogBuilder::new();
    let wood = builder.register_resource("wood");
    let plank = builder.register_resource("plank");
    let gear = builder.register_resource("gear");
    let catalog = builder.build().expect("catalog is valid");

    // --- Step 2: Create the shared warehouse ---

    let mut plant = Plant::new();
    let wood_pile = plant.warehouse.create_store(wood, 20);
    let plank_pile = plant.warehouse.create_store(plank, 0);
    let gear_bin = plant.warehouse.create_store(gear, 0);

    // --- Step 3: Configure the factories ---

    // Sawmill: 2 wood -> 3 planks, 2 seconds.
    let saw_recipe = Recipe::new(
        vec![InputRequirement {
            store: wood_pile,
            quantity: 2,
        }],
        plank_pile,
        3,
        f64_to_seconds(2.0),
        &plant.warehouse,
    )
    .expect("sawmill recipe is valid");
    let sawmill = plant.add_factory(Factory::new(saw_recipe, FactoryConfig::default()));

    // Workshop: 4 planks -> 1 gear, 3 seconds, short cool-down while the
    // sawmill catches up.
    let gear_recipe = Recipe::new(
        vec![InputRequirement {
            store: plank_pile,
            quantity: 4,
        }],
        gear_bin,
        1,
        f64_to_seconds(3.0),
        &plant.warehouse,
    )
    .expect("workshop recipe is valid");
    let workshop = plant.add_factory(Factory::new(
        gear_recipe,
        FactoryConfig {
            cool_down: f64_to_seconds(1.0),
            queue_gated: false,
        },
    ));

    // --- Step 4: Listen for completions ---

    // The listener owns the catalog and resolves display names.
    plant.events.on(
        EventKind::ItemProduced,
        Box::new(move |event| {
            if let Event::ItemProduced {
                resource, quantity, ..
            } = event
            {
                let name = catalog.name(*resource).unwrap_or("?");
                println!("  produced: {quantity} {name}");
            }
        }),
    );

    // --- Step 5: Run the host loop ---

    println!("Running 20 frames of the production line...\n");

    for frame in 0..20 {
        plant.advance(f64_to_seconds(0.5));

        println!("=== Frame {} ===", frame + 1);
        for (label, id) in [("sawmill", sawmill), ("workshop", workshop)] {
            let status = plant.factory(id).expect("factory exists").status();
            println!(
                "  {label}: {:?} {}% (queue {}) -- {}",
                status.state,
                status.percentage.round(),
                status.queue_depth,
                status.message
            );
        }
        println!(
            "  stores: wood={} plank={} gear={}",
            plant.warehouse.quantity(wood_pile),
            plant.warehouse.quantity(plank_pile),
            plant.warehouse.quantity(gear_bin),
        );
    }
}
