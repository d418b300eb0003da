//! Crowd separation demo: a pile of entities spreading out over a few
//! ticks, with one immovable boss in the middle.

use collision_engine::prelude::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut movers = vec![Mover {
        position: Vec3::new(0.0, 0.0, 0.0),
        exclusion_radius: 1.2,
        flags: MoverFlags::CAN_MOVE_OTHERS,
    }];
    for _ in 0..8 {
        movers.push(Mover::new(Vec3::new(0.0, 0.0, 0.0), 0.4));
    }

    for tick in 0..20 {
        push_apart(&mut movers, 6.0, 2.0, 1.0 / 30.0, &mut rng);
        if tick % 5 == 4 {
            let spread = movers
                .iter()
                .map(|m| m.position.magnitude())
                .fold(0.0f32, f32::max);
            info!("tick {tick}: max spread {spread:.2}");
        }
    }

    for (i, mover) in movers.iter().enumerate() {
        info!(
            "mover {i}: ({:.2}, {:.2})",
            mover.position.x, mover.position.z
        );
    }
}
