//! Pairwise entity separation ("push-apart")
//!
//! Resolves overlapping entity footprints on the horizontal plane without
//! order bias toward any one entity: a work queue compares each entity once
//! against every not-yet-processed other. Capability flags support
//! asymmetric cases like stationary large monsters that push but cannot be
//! pushed.

use rand::Rng;

use crate::foundation::math::Vec3;

bitflags::bitflags! {
    /// Movement capabilities of a push-apart participant
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MoverFlags: u32 {
        /// This entity may be displaced by others
        const CAN_BE_MOVED = 1 << 0;
        /// This entity displaces others
        const CAN_MOVE_OTHERS = 1 << 1;
    }
}

/// One push-apart participant
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    /// World position, displaced in place
    pub position: Vec3,
    /// Horizontal exclusion radius of the footprint
    pub exclusion_radius: f32,
    /// Capability flags
    pub flags: MoverFlags,
}

impl Mover {
    /// A fully mobile participant
    pub fn new(position: Vec3, exclusion_radius: f32) -> Self {
        Self {
            position,
            exclusion_radius,
            flags: MoverFlags::CAN_BE_MOVED | MoverFlags::CAN_MOVE_OTHERS,
        }
    }
}

/// Separate overlapping entity footprints, mutating positions in place.
///
/// Pairs farther apart than `radius` are ignored. The push magnitude per
/// pair is `min(max_push * elapsed, overlap)`; exactly coincident pairs get
/// a randomized horizontal direction from the caller-supplied `rng` so the
/// outcome stays deterministic under a seeded generator.
pub fn push_apart<R: Rng>(
    movers: &mut [Mover],
    radius: f32,
    max_push: f32,
    elapsed: f32,
    rng: &mut R,
) {
    let budget = max_push * elapsed;
    if budget <= 0.0 {
        return;
    }

    for i in 0..movers.len() {
        for j in (i + 1)..movers.len() {
            let delta = movers[i].position - movers[j].position;
            let horizontal = Vec3::new(delta.x, 0.0, delta.z);
            let dist = horizontal.magnitude();
            if dist > radius {
                continue;
            }

            let combined = movers[i].exclusion_radius + movers[j].exclusion_radius;
            let overlap = combined - dist;
            if overlap <= 0.0 {
                continue;
            }

            let direction = if dist > 1e-6 {
                horizontal / dist
            } else {
                let angle = rng.gen::<f32>() * std::f32::consts::TAU;
                Vec3::new(angle.cos(), 0.0, angle.sin())
            };
            let push = direction * budget.min(overlap);

            let i_moves = movers[i].flags.contains(MoverFlags::CAN_BE_MOVED)
                && movers[j].flags.contains(MoverFlags::CAN_MOVE_OTHERS);
            let j_moves = movers[j].flags.contains(MoverFlags::CAN_BE_MOVED)
                && movers[i].flags.contains(MoverFlags::CAN_MOVE_OTHERS);

            if i_moves {
                movers[i].position += push;
            }
            if j_moves {
                movers[j].position -= push;
            }
        }
    }
}
