//! Queue-gated factory example.
//!
//! A workshop that only produces on request: the host enqueues three orders
//! up front, and the factory works them off one at a time.
//!
//! Run with: `cargo run -p millworks-core --example queued_workshop`

use millworks_core::factory::{Factory, FactoryConfig};
use millworks_core::fixed::f64_to_seconds;
use millworks_core::id::ResourceId;
use millworks_core::plant::Plant;
use millworks_core::recipe::{InputRequirement, Recipe};

fn main() {
    let iron = ResourceId(0);
    let sword = ResourceId(1);

    let mut plant = Plant::new();
    let iron_pile = plant.warehouse.create_store(iron, 10);
    let sword_rack = plant.warehouse.create_store(sword, 0);

    // 3 iron -> 1 sword, 1.5 seconds. Only forged on request.
    let recipe = Recipe::new(
        vec![InputRequirement {
            store: iron_pile,
            quantity: 3,
        }],
        sword_rack,
        1,
        f64_to_seconds(1.5),
        &plant.warehouse,
    )
    .expect("forge recipe is valid");
    let forge = plant.add_factory(Factory::new(
        recipe,
        FactoryConfig {
            cool_down: f64_to_seconds(2.0),
            queue_gated: true,
        },
    ));

    // Three orders come in before the first frame.
    for _ in 0..3 {
        plant.enqueue(forge);
    }

    println!("Forging 3 queued swords from 10 iron...\n");

    for frame in 0..12 {
        let completed = plant.advance(f64_to_seconds(0.5));
        let status = plant.factory(forge).expect("factory exists").status();

        println!(
            "frame {:>2}: {:?} queue={} iron={} swords={} -- {}",
            frame + 1,
            status.state,
            status.queue_depth,
            plant.warehouse.quantity(iron_pile),
            plant.warehouse.quantity(sword_rack),
            status.message
        );
        for (_, produced) in completed {
            println!("          finished a batch of {}", produced.quantity);
        }
    }
}
